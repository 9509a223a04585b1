//! Provisioning error types

use thiserror::Error;

/// Provisioning errors
///
/// Every variant is fatal for the run. Nothing is retried locally.
#[derive(Error, Debug)]
pub enum CloudError {
    /// Malformed hostname, service URL or credential, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Zone or account could not be resolved
    #[error("Not found: {0}")]
    NotFound(String),

    /// API call returned `success: false` or the transport failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Response lacks expected fields or identifier shapes
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CloudError {
    /// Short category name, used in reports and logs
    pub fn kind(&self) -> &'static str {
        match self {
            CloudError::Validation(_) => "validation",
            CloudError::NotFound(_) => "not-found",
            CloudError::Provider(_) => "provider",
            CloudError::MalformedResponse(_) => "malformed-response",
        }
    }
}

impl From<serde_json::Error> for CloudError {
    fn from(e: serde_json::Error) -> Self {
        CloudError::MalformedResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
