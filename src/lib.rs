//! Canivete - a Swiss-army knife of small, independent helpers
//!
//! This library provides:
//! - Compound interest with periodic contributions and a per-period history
//! - Unix timestamp to UTC date conversion
//! - JWT header/payload decoding (no signature verification)
//! - Random UUID generation
//! - Medium post to Markdown conversion

pub mod datetime;
pub mod finance;
pub mod internet;
pub mod programming;

// Re-export commonly used types
pub use finance::{
    calculate_compound_interests, CompoundInterestRequest, CompoundInterestResult, FinanceError,
};
pub use datetime::{from_unix_timestamp, FromUnixTimestampOutput};
pub use programming::{debug_jwt, new_uuid};
pub use internet::{post_to_markdown, MediumClient, MediumConfig};
