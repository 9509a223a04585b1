//! Zone and account lookup

use crate::error::{CloudError, Result};
use crate::ids::ensure_hex_id;
use crate::model::Zone;
use crate::provider::TunnelApi;

/// Resolve `root_domain` to its zone and owning account
///
/// The first zone listed wins. A zone without an account means the
/// credential cannot see account resources.
pub async fn locate_zone(api: &dyn TunnelApi, root_domain: &str) -> Result<Zone> {
    tracing::debug!("Looking up zone for {}", root_domain);

    let zones = api.list_zones(root_domain).await?;
    let zone = zones.into_iter().next().ok_or_else(|| {
        CloudError::NotFound(format!(
            "zone '{}' is not registered under this credential",
            root_domain
        ))
    })?;

    let account_id = zone.account_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        CloudError::NotFound(format!(
            "zone '{}' has no account id; the token may lack account scope",
            root_domain
        ))
    })?;

    ensure_hex_id("zone id", &zone.id)?;
    ensure_hex_id("account id", &account_id)?;

    tracing::info!("Zone {} resolved: zone={} account={}", root_domain, zone.id, account_id);
    Ok(Zone {
        id: zone.id,
        account_id,
    })
}
