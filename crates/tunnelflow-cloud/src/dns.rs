//! DNS record reconciliation

use crate::error::Result;
use crate::model::{DnsRecord, DnsRecordRequest};
use crate::provider::TunnelApi;

pub const CNAME: &str = "CNAME";

/// Result of upserting the tunnel CNAME
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsChange {
    Created(DnsRecord),
    Updated {
        record: DnsRecord,
        previous: DnsRecord,
    },
}

impl DnsChange {
    pub fn record(&self) -> &DnsRecord {
        match self {
            DnsChange::Created(record) => record,
            DnsChange::Updated { record, .. } => record,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, DnsChange::Created(_))
    }
}

/// Existing CNAME records named exactly `hostname`
pub async fn find_cname_records(
    api: &dyn TunnelApi,
    zone_id: &str,
    hostname: &str,
) -> Result<Vec<DnsRecord>> {
    tracing::debug!("Listing CNAME records for {}", hostname);
    let records = api.list_dns_records(zone_id, CNAME, hostname).await?;
    Ok(records
        .into_iter()
        .filter(|r| r.record_type == CNAME && r.name.eq_ignore_ascii_case(hostname))
        .collect())
}

/// Point `hostname` at the tunnel, updating the first existing CNAME or
/// creating one. The existing content is overwritten unconditionally.
///
/// The returned record id is not shape-checked here so that callers can
/// record the mutation before validating it.
pub async fn reconcile_dns(
    api: &dyn TunnelApi,
    zone_id: &str,
    hostname: &str,
    tunnel_id: &str,
) -> Result<DnsChange> {
    let request = DnsRecordRequest::tunnel_cname(hostname, tunnel_id);
    let existing = find_cname_records(api, zone_id, hostname).await?;

    let change = match existing.into_iter().next() {
        Some(previous) => {
            tracing::info!(
                "Updating DNS record {} from {} to {}",
                previous.name,
                previous.content,
                request.content
            );
            let record = api.update_dns_record(zone_id, &previous.id, &request).await?;
            DnsChange::Updated { record, previous }
        }
        None => {
            tracing::info!("Creating DNS record {} -> {}", hostname, request.content);
            let record = api.create_dns_record(zone_id, &request).await?;
            DnsChange::Created(record)
        }
    };

    Ok(change)
}
