//! Cloudflare provider error types

use thiserror::Error;
use tunnelflow_cloud::CloudError;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// `success: false`; carries the response's `errors` array verbatim
    #[error("Cloudflare API error: {0}")]
    ApiError(String),

    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("environment variable not set: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CloudflareError> for CloudError {
    fn from(e: CloudflareError) -> Self {
        match e {
            CloudflareError::Http(_)
            | CloudflareError::ApiError(_)
            | CloudflareError::UnexpectedStatus { .. } => CloudError::Provider(e.to_string()),
            CloudflareError::JsonError(_) => CloudError::MalformedResponse(e.to_string()),
            CloudflareError::MissingEnvVar(_) | CloudflareError::InvalidConfig(_) => {
                CloudError::Validation(e.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudflareError>;
