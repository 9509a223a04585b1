//! Ingress configuration

use crate::error::Result;
use crate::model::IngressConfig;
use crate::provider::TunnelApi;

/// Push `hostname -> service_url` plus the 404 catch-all as the tunnel's
/// whole configuration. Rules for other hostnames are dropped.
pub async fn configure_ingress(
    api: &dyn TunnelApi,
    account_id: &str,
    tunnel_id: &str,
    hostname: &str,
    service_url: &str,
) -> Result<IngressConfig> {
    let config = IngressConfig::route(hostname, service_url);
    config.validate()?;

    tracing::info!("Routing {} -> {} on tunnel {}", hostname, service_url, tunnel_id);
    api.put_tunnel_configuration(account_id, tunnel_id, &config)
        .await?;

    Ok(config)
}
