//! Credential verification

use crate::client::CloudflareClient;
use crate::error::Result;
use serde::Deserialize;

/// Result of `GET /user/tokens/verify`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenVerification {
    pub id: String,
    pub status: String,
}

impl TokenVerification {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

impl CloudflareClient {
    pub async fn verify_token(&self) -> Result<TokenVerification> {
        self.get("/user/tokens/verify", &[]).await
    }
}
