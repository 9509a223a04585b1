//! Cloudflare v4 API client
//!
//! Bearer-token authenticated JSON requests. Every response is unwrapped
//! from the `{success, errors, result}` envelope; `success: false` becomes
//! an error carrying `errors` verbatim.

use crate::error::{CloudflareError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const USER_AGENT: &str = concat!("tunnelflow/", env!("CARGO_PKG_VERSION"));

/// Configuration for the API client
#[derive(Clone)]
pub struct ClientConfig {
    pub api_token: String,
    pub base_url: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the public API endpoint
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(CloudflareError::InvalidConfig(
                "API token is empty".to_string(),
            ));
        }
        if api_token.chars().any(char::is_whitespace) {
            return Err(CloudflareError::InvalidConfig(
                "API token must not contain whitespace".to_string(),
            ));
        }

        Ok(Self {
            api_token,
            base_url: CLOUDFLARE_API_BASE.to_string(),
        })
    }

    /// Point the client at another API root (e.g. a mock server)
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url).map_err(|e| {
            CloudflareError::InvalidConfig(format!("invalid API base URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CloudflareError::InvalidConfig(format!(
                "API base URL must be http or https: {}",
                base_url
            )));
        }

        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Create ClientConfig from environment variables
    ///
    /// `CLOUDFLARE_API_TOKEN` is required, `CLOUDFLARE_API_BASE` optional.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("CLOUDFLARE_API_TOKEN")
            .map_err(|_| CloudflareError::MissingEnvVar("CLOUDFLARE_API_TOKEN".to_string()))?;
        let config = Self::new(api_token)?;

        match std::env::var("CLOUDFLARE_API_BASE") {
            Ok(base_url) => config.with_base_url(&base_url),
            Err(_) => Ok(config),
        }
    }
}

/// Cloudflare API client
pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_token: config.api_token,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!("GET {}", path);
        self.send(self.client.get(self.url(path)).query(query))
            .await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("PUT {}", path);
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("PATCH {}", path);
        self.send(self.client.patch(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("DELETE {}", path);
        self.send(self.client.delete(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.api_token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(CloudflareError::JsonError(e)),
            Err(_) => {
                return Err(CloudflareError::UnexpectedStatus {
                    status: status.as_u16(),
                    body: truncate(&body, 512),
                });
            }
        };

        if !envelope.success {
            return Err(CloudflareError::ApiError(envelope.errors.to_string()));
        }

        Ok(serde_json::from_value(envelope.result)?)
    }
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// ============ API Types ============

/// Response envelope; `result` is decoded only after `success` is checked
#[derive(Debug, Deserialize)]
struct ApiResponse {
    success: bool,
    #[serde(default)]
    errors: serde_json::Value,
    #[serde(default)]
    result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_bad_tokens() {
        assert!(matches!(
            ClientConfig::new(""),
            Err(CloudflareError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::new("abc def"),
            Err(CloudflareError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_defaults_to_public_api() {
        let config = ClientConfig::new("token123").unwrap();
        assert_eq!(config.base_url, CLOUDFLARE_API_BASE);
        assert!(!format!("{:?}", config).contains("token123"));
    }

    #[test]
    fn test_config_base_url_override() {
        let config = ClientConfig::new("token123")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");

        let client = CloudflareClient::new(config).unwrap();
        assert_eq!(client.url("/zones"), "http://127.0.0.1:8080/zones");

        assert!(
            ClientConfig::new("token123")
                .unwrap()
                .with_base_url("ftp://example.com")
                .is_err()
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
