//! Compound interest engine
//!
//! The future value of a principal is `a = p * (1 + r/n)^(n*t)`.
//! Regular contributions add a series term:
//!
//! ```text
//! a_series = m * (y/n) * [((1 + r/n)^(n*t) - 1) / (r/n)]
//! total    = a + a_series
//! ```
//!
//! Where `p` is the principal, `r` the annual rate as a decimal, `n` the number
//! of compounding periods per unit of time, `t` the duration, `m` the regular
//! contribution and `y` the number of contributions per compounding period.

use log::debug;
use serde::{Deserialize, Serialize};

use super::results::{CompoundInterestDetail, CompoundInterestResult, HistoryEntry};
use super::FinanceError;

/// Inputs for a compound interest calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompoundInterestRequest {
    /// Initial amount invested or borrowed (p)
    pub principal: f64,

    /// Compounding periods per unit of time (n)
    pub periods_per_year: f64,

    /// Number of time units (t); its integer part bounds the history
    pub duration: f64,

    /// Regular contribution amount (m), zero for none
    #[serde(default)]
    pub contribution: f64,

    /// Contributions per compounding period (y); must be positive when m > 0
    #[serde(default)]
    pub contributions_per_period: f64,

    /// Annual interest rate as a percentage, e.g. 5.0 for 5%
    pub annual_rate_pct: f64,
}

impl CompoundInterestRequest {
    /// Request without regular contributions
    pub fn new(principal: f64, periods_per_year: f64, duration: f64, annual_rate_pct: f64) -> Self {
        Self {
            principal,
            periods_per_year,
            duration,
            contribution: 0.0,
            contributions_per_period: 0.0,
            annual_rate_pct,
        }
    }

    /// Add a regular contribution of `amount`, made `per_period` times per compounding period
    pub fn with_contributions(mut self, amount: f64, per_period: f64) -> Self {
        self.contribution = amount;
        self.contributions_per_period = per_period;
        self
    }

    fn validate(&self) -> Result<(), FinanceError> {
        if self.contribution > 0.0 && self.contributions_per_period <= 0.0 {
            return Err(FinanceError::InvalidInput(
                "y must be bigger than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of whole periods reported in the history
    fn history_periods(&self) -> u32 {
        // Saturating cast: NaN and negative durations give an empty history
        self.duration as u32
    }
}

/// Calculate the future value of an investment and its yearly history.
///
/// Only `m > 0 && y <= 0` is rejected. Degenerate inputs such as `n = 0` are
/// not guarded and come back as non-finite amounts.
pub fn calculate_compound_interests(
    request: &CompoundInterestRequest,
) -> Result<CompoundInterestResult, FinanceError> {
    request.validate()?;

    let rate = request.annual_rate_pct / 100.0;
    let total = calculate_detail(request, request.duration, rate);

    let periods = request.history_periods();
    let history = (1..=periods)
        .map(|period| HistoryEntry {
            period: period.to_string(),
            totals: calculate_detail(request, period as f64, rate),
        })
        .collect::<Vec<_>>();

    debug!(
        "compound interest: {:?} -> final {} over {} history periods",
        request,
        total.final_amount,
        history.len()
    );

    Ok(CompoundInterestResult { total, history })
}

/// Values at time `t` for the request's principal, frequency and contributions
fn calculate_detail(request: &CompoundInterestRequest, t: f64, rate: f64) -> CompoundInterestDetail {
    let p = request.principal;
    let n = request.periods_per_year;
    let m = request.contribution;
    let y = request.contributions_per_period;

    let periodic_rate = rate / n;
    let growth = (1.0 + periodic_rate).powf(n * t);

    let base = p * growth;
    let series = if m > 0.0 {
        m * (y / n) * ((growth - 1.0) / periodic_rate)
    } else {
        0.0
    };

    let final_amount = round_two_decimal_places(base + series);
    let total_contributions = round_two_decimal_places(p + m * y * t);
    let interests = round_two_decimal_places(final_amount - total_contributions);

    CompoundInterestDetail {
        final_amount,
        total_contributions,
        interests,
    }
}

/// Round up to two decimal places: `ceil(v * 100) / 100`.
///
/// This is not half-even or half-up rounding; 1.001 becomes 1.01.
pub fn round_two_decimal_places(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}
