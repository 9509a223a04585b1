//! Tunnel provider trait definition

use crate::error::Result;
use crate::model::{DnsRecord, DnsRecordRequest, IngressConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Control-plane operations the reconciliation stages depend on
///
/// The HTTP client implements this against the Cloudflare API; tests inject
/// an in-memory fake. Every call is made at most once per stage and never
/// retried.
#[async_trait]
pub trait TunnelApi: Send + Sync {
    /// Check the API credential itself
    async fn verify_token(&self) -> Result<AuthStatus>;

    /// Zones whose name equals `name`
    async fn list_zones(&self, name: &str) -> Result<Vec<ZoneInfo>>;

    /// Non-deleted tunnels named `name` under the account
    async fn list_tunnels(&self, account_id: &str, name: &str) -> Result<Vec<TunnelInfo>>;

    /// Connector token of an existing tunnel
    async fn get_tunnel_token(&self, account_id: &str, tunnel_id: &str) -> Result<String>;

    async fn create_tunnel(&self, account_id: &str, tunnel: &NewTunnel) -> Result<TunnelInfo>;

    async fn delete_tunnel(&self, account_id: &str, tunnel_id: &str) -> Result<()>;

    /// Replace the tunnel's whole remote configuration
    async fn put_tunnel_configuration(
        &self,
        account_id: &str,
        tunnel_id: &str,
        config: &IngressConfig,
    ) -> Result<()>;

    /// Records of `record_type` whose name equals `name`
    async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>>;

    async fn create_dns_record(
        &self,
        zone_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecord>;

    /// Partial update (PATCH) of an existing record
    async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecord>;

    async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Token id or other account information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

/// Zone as listed by the provider; the account may be missing when the
/// credential lacks account scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub id: String,
    pub name: String,
    pub account_id: Option<String>,
}

/// Tunnel as listed or created by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelInfo {
    pub id: String,
    pub name: String,

    /// Set when the tunnel has been deleted
    #[serde(default)]
    pub deleted: bool,

    /// Only returned on creation
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of a tunnel creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTunnel {
    pub name: String,
    pub config_src: String,
    pub tunnel_secret: String,
}
