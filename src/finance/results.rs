//! Output structures for compound interest calculations

use serde::{Deserialize, Serialize};

/// Amounts at a point in time, each rounded up to cents independently
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestDetail {
    pub final_amount: f64,
    pub total_contributions: f64,
    pub interests: f64,
}

/// One whole period of the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based period number as text
    pub period: String,
    pub totals: CompoundInterestDetail,
}

/// Complete calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    /// Values at the full requested duration
    pub total: CompoundInterestDetail,

    /// Values at each whole period from 1 to floor(duration)
    pub history: Vec<HistoryEntry>,
}

impl CompoundInterestResult {
    /// Write the history as CSV with a header row
    pub fn write_history_csv<W: std::io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Period", "FinalAmount", "TotalContributions", "Interests"])?;

        for entry in &self.history {
            wtr.write_record([
                entry.period.clone(),
                format!("{:.2}", entry.totals.final_amount),
                format!("{:.2}", entry.totals.total_contributions),
                format!("{:.2}", entry.totals.interests),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
