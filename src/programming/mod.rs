//! Developer helpers: JWT inspection and UUID generation

mod jwt;
mod uuid;

pub use jwt::{debug_jwt, JwtDebugOutput, JwtError};
pub use self::uuid::{new_uuid, UuidOutput};
