//! Identifier shape checks
//!
//! Responses whose identifiers do not have the documented shape are rejected
//! instead of being carried into later stages.

use crate::error::{CloudError, Result};
use uuid::Uuid;

/// 32 lowercase hex characters (zone, account and DNS record IDs)
pub fn is_hex_id(value: &str) -> bool {
    value.len() == 32
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Hyphenated 8-4-4-4-12 UUID (tunnel IDs)
pub fn is_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

pub fn ensure_hex_id(what: &str, value: &str) -> Result<()> {
    if is_hex_id(value) {
        Ok(())
    } else {
        Err(CloudError::MalformedResponse(format!(
            "{} '{}' is not a 32-character hex identifier",
            what, value
        )))
    }
}

pub fn ensure_uuid(what: &str, value: &str) -> Result<()> {
    if is_uuid(value) {
        Ok(())
    } else {
        Err(CloudError::MalformedResponse(format!(
            "{} '{}' is not a UUID",
            what, value
        )))
    }
}
