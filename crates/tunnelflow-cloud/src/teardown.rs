//! Removal of a hostname's tunnel and DNS record

use crate::action::ApplyResult;
use crate::dns;
use crate::error::Result;
use crate::hostname;
use crate::model::TUNNEL_DOMAIN;
use crate::provider::TunnelApi;
use crate::tunnel;
use crate::zone;

/// Delete the tunnel CNAME for `hostname` and every active tunnel named after
/// its first label. Resources already gone are skipped.
///
/// CNAME records not pointing into the tunnel domain are left alone.
pub async fn teardown(api: &dyn TunnelApi, hostname: &str) -> Result<ApplyResult> {
    let (tunnel_name, root_domain) = hostname::resolve(hostname)?;
    let fqdn = format!("{}.{}", tunnel_name, root_domain);
    let zone = zone::locate_zone(api, &root_domain).await?;

    let mut result = ApplyResult::new();
    let started = std::time::Instant::now();
    let suffix = format!(".{}", TUNNEL_DOMAIN);

    for record in dns::find_cname_records(api, &zone.id, &fqdn).await? {
        if !record.content.ends_with(&suffix) {
            tracing::info!(
                "Keeping DNS record {} -> {} (not a tunnel target)",
                record.name,
                record.content
            );
            continue;
        }
        tracing::info!("Deleting DNS record {} ({})", record.name, record.id);
        api.delete_dns_record(&zone.id, &record.id).await?;
        result.add_success(
            format!("delete-dns-record-{}", record.id),
            format!("deleted DNS record {} -> {}", record.name, record.content),
        );
    }

    for found in tunnel::find_tunnels(api, &zone.account_id, &tunnel_name).await? {
        tracing::info!("Deleting tunnel {} ({})", found.name, found.id);
        api.delete_tunnel(&zone.account_id, &found.id).await?;
        result.add_success(
            format!("delete-tunnel-{}", found.id),
            format!("deleted tunnel {} ({})", found.name, found.id),
        );
    }

    if result.is_empty() {
        tracing::info!("Nothing to tear down for {}", fqdn);
    }

    result.finish(started);
    Ok(result)
}
