//! Compound interest calculation with per-period history

mod engine;
mod results;

pub use engine::{calculate_compound_interests, round_two_decimal_places, CompoundInterestRequest};
pub use results::{CompoundInterestDetail, CompoundInterestResult, HistoryEntry};

use thiserror::Error;

/// Errors raised by the finance calculators
#[derive(Debug, Error, PartialEq)]
pub enum FinanceError {
    #[error("{0}")]
    InvalidInput(String),
}
