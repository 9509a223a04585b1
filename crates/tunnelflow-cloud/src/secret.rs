//! Tunnel secrets and connector tokens
//!
//! A connector token is standard base64 of `{"a": account, "t": tunnel, "s": secret}`.
//! Reused tunnels get their secret back from the token instead of a new one,
//! so connectors already running with it keep working.

use crate::error::{CloudError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Size of a tunnel secret before encoding
pub const SECRET_LEN: usize = 32;

/// Payload embedded in a connector token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "a")]
    pub account_tag: String,
    #[serde(rename = "t")]
    pub tunnel_id: String,
    #[serde(rename = "s")]
    pub secret: String,
}

/// Fresh base64-encoded secret from the OS RNG
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_LEN];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

pub fn decode_token(token: &str) -> Result<TokenPayload> {
    let raw = STANDARD.decode(token.trim()).map_err(|e| {
        CloudError::MalformedResponse(format!("connector token is not base64: {}", e))
    })?;
    serde_json::from_slice(&raw).map_err(|e| {
        CloudError::MalformedResponse(format!("connector token payload is not valid: {}", e))
    })
}

pub fn encode_token(payload: &TokenPayload) -> Result<String> {
    Ok(STANDARD.encode(serde_json::to_vec(payload)?))
}
