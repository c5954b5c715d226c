//! Unix timestamp conversion

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Layout of the Unix `date` command, always in UTC
const UNIX_DATE_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

#[derive(Debug, Error, PartialEq)]
pub enum DateTimeError {
    #[error("timestamp {0} is out of the supported range")]
    OutOfRange(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FromUnixTimestampOutput {
    pub unix_timestamp: i64,
    pub utc_timestamp: String,
}

/// Convert seconds since the epoch to a UTC date string
pub fn from_unix_timestamp(unix_time: i64) -> Result<FromUnixTimestampOutput, DateTimeError> {
    let instant: DateTime<Utc> =
        DateTime::from_timestamp(unix_time, 0).ok_or(DateTimeError::OutOfRange(unix_time))?;

    Ok(FromUnixTimestampOutput {
        unix_timestamp: unix_time,
        utc_timestamp: instant.format(UNIX_DATE_FORMAT).to_string(),
    })
}
