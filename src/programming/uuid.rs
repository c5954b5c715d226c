//! Random UUID generation

use serde::Serialize;
use ::uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UuidOutput {
    pub uuid: String,
}

/// Generate a random (version 4) UUID
pub fn new_uuid() -> UuidOutput {
    UuidOutput {
        uuid: Uuid::new_v4().to_string(),
    }
}
