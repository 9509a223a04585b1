//! Desired and remote state of a tunnel deployment

use crate::error::{CloudError, Result};
use crate::hostname;
use serde::{Deserialize, Serialize};

/// Service the hostname is routed to when none is given
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3010";

/// Domain under which every tunnel is addressable
pub const TUNNEL_DOMAIN: &str = "cfargotunnel.com";

/// Service of the trailing catch-all ingress rule
pub const CATCH_ALL_SERVICE: &str = "http_status:404";

/// Origin of tunnel configuration (remotely managed)
pub const CONFIG_SRC_CLOUDFLARE: &str = "cloudflare";

/// CNAME target for a tunnel: `<tunnel_id>.cfargotunnel.com`
pub fn cname_target(tunnel_id: &str) -> String {
    format!("{}.{}", tunnel_id, TUNNEL_DOMAIN)
}

/// What the operator asked for: hostname routed to a local service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesiredState {
    /// Fully-qualified hostname (at least three labels)
    pub hostname: String,

    /// Local service URL (`http` or `https`)
    pub service_url: String,

    /// Leftmost label of the hostname
    pub tunnel_name: String,

    /// Hostname without its leftmost label
    pub root_domain: String,
}

impl DesiredState {
    pub fn new(hostname: &str, service_url: &str) -> Result<Self> {
        let (tunnel_name, root_domain) = hostname::resolve(hostname)?;
        let service_url = validate_service_url(service_url)?;

        Ok(Self {
            hostname: format!("{}.{}", tunnel_name, root_domain),
            service_url,
            tunnel_name,
            root_domain,
        })
    }

    /// Whether the origin is reached over TLS
    pub fn is_tls_origin(&self) -> bool {
        is_https(&self.service_url)
    }
}

fn validate_service_url(service_url: &str) -> Result<String> {
    let trimmed = service_url.trim();
    let parsed = url::Url::parse(trimmed).map_err(|e| {
        CloudError::Validation(format!("invalid service URL '{}': {}", service_url, e))
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CloudError::Validation(format!(
                "service URL must use http or https, got '{}'",
                other
            )));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(CloudError::Validation(format!(
            "service URL has no host: {}",
            service_url
        )));
    }

    Ok(trimmed.to_string())
}

pub(crate) fn is_https(service_url: &str) -> bool {
    service_url
        .get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}

/// DNS zone together with its owning account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub account_id: String,
}

/// Tunnel selected or created for this run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tunnel {
    pub id: String,
    pub name: String,

    /// Base64 of the 32-byte tunnel secret, when known
    #[serde(skip_serializing)]
    pub secret: Option<String>,

    /// Connector token, when known
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Whether this run created the tunnel
    pub created: bool,
}

/// Ingress rule of a remotely-managed tunnel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    pub service: String,

    #[serde(
        rename = "originRequest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub origin_request: Option<OriginRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRequest {
    #[serde(rename = "noTLSVerify")]
    pub no_tls_verify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpRouting {
    pub enabled: bool,
}

/// Full tunnel configuration, pushed as a replacement of the remote one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressConfig {
    pub ingress: Vec<IngressRule>,

    #[serde(rename = "warp-routing")]
    pub warp_routing: WarpRouting,
}

impl IngressConfig {
    /// Route `hostname` to `service_url`, followed by the 404 catch-all
    pub fn route(hostname: &str, service_url: &str) -> Self {
        let origin_request = is_https(service_url).then_some(OriginRequest {
            no_tls_verify: true,
        });

        Self {
            ingress: vec![
                IngressRule {
                    hostname: Some(hostname.to_string()),
                    service: service_url.to_string(),
                    origin_request,
                },
                IngressRule {
                    hostname: None,
                    service: CATCH_ALL_SERVICE.to_string(),
                    origin_request: None,
                },
            ],
            warp_routing: WarpRouting { enabled: false },
        }
    }

    /// Last rule must be a catch-all; every rule before it must match a hostname
    pub fn validate(&self) -> Result<()> {
        let Some((last, rest)) = self.ingress.split_last() else {
            return Err(CloudError::Validation(
                "ingress must contain at least the catch-all rule".to_string(),
            ));
        };

        if last.hostname.is_some() {
            return Err(CloudError::Validation(
                "last ingress rule must not match a hostname".to_string(),
            ));
        }

        if let Some(rule) = rest.iter().find(|r| r.hostname.is_none()) {
            return Err(CloudError::Validation(format!(
                "ingress rule for service '{}' has no hostname but is not last",
                rule.service
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordSettings {
    #[serde(default)]
    pub flatten_cname: bool,
}

/// DNS record as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default)]
    pub settings: DnsRecordSettings,
}

/// Body of a DNS record create or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub proxied: bool,
    pub settings: DnsRecordSettings,
}

impl DnsRecordRequest {
    /// Proxied CNAME pointing `hostname` at the tunnel
    pub fn tunnel_cname(hostname: &str, tunnel_id: &str) -> Self {
        Self {
            name: hostname.to_string(),
            record_type: "CNAME".to_string(),
            content: cname_target(tunnel_id),
            proxied: true,
            settings: DnsRecordSettings {
                flatten_cname: false,
            },
        }
    }
}

impl From<&DnsRecord> for DnsRecordRequest {
    fn from(record: &DnsRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            content: record.content.clone(),
            proxied: record.proxied,
            settings: record.settings.clone(),
        }
    }
}

/// Credentials file a connector uses to run the tunnel without re-registering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorCredentials {
    #[serde(rename = "AccountTag")]
    pub account_tag: String,
    #[serde(rename = "TunnelSecret")]
    pub tunnel_secret: String,
    #[serde(rename = "TunnelID")]
    pub tunnel_id: String,
    #[serde(rename = "Endpoint")]
    pub endpoint: String,
}
