//! Read-only preview of a provisioning run

use crate::action::{
    Action, ActionType, Plan, RESOURCE_DNS_RECORD, RESOURCE_INGRESS, RESOURCE_TUNNEL,
};
use crate::dns;
use crate::error::Result;
use crate::model::{DesiredState, cname_target};
use crate::provider::TunnelApi;
use crate::tunnel::{self, TunnelPolicy};
use crate::zone;

/// Placeholder for the id of a tunnel that does not exist yet
const NEW_TUNNEL: &str = "<new-tunnel-id>";

/// Compute what [`crate::Provisioner::run`] would do, issuing only reads
pub async fn plan(
    api: &dyn TunnelApi,
    desired: &DesiredState,
    policy: TunnelPolicy,
) -> Result<Plan> {
    let zone = zone::locate_zone(api, &desired.root_domain).await?;
    let existing = tunnel::find_tunnels(api, &zone.account_id, &desired.tunnel_name).await?;
    let mut actions = Vec::new();

    let tunnel_id = match (policy, existing.first()) {
        (TunnelPolicy::Reuse, Some(found)) => {
            actions.push(Action::new(
                ActionType::NoOp,
                RESOURCE_TUNNEL,
                found.id.clone(),
                format!("reuse tunnel {} ({})", found.name, found.id),
            ));
            Some(found.id.clone())
        }
        _ => {
            if policy == TunnelPolicy::Recreate {
                for old in &existing {
                    actions.push(Action::new(
                        ActionType::Delete,
                        RESOURCE_TUNNEL,
                        old.id.clone(),
                        format!("delete tunnel {} ({})", old.name, old.id),
                    ));
                }
            }
            actions.push(
                Action::new(
                    ActionType::Create,
                    RESOURCE_TUNNEL,
                    desired.tunnel_name.clone(),
                    format!("create tunnel {}", desired.tunnel_name),
                )
                .with_detail("policy", serde_json::json!(policy.to_string())),
            );
            None
        }
    };

    actions.push(
        Action::new(
            ActionType::Update,
            RESOURCE_INGRESS,
            desired.tunnel_name.clone(),
            format!("route {} -> {}", desired.hostname, desired.service_url),
        )
        .with_detail("no_tls_verify", serde_json::json!(desired.is_tls_origin())),
    );

    let target = cname_target(tunnel_id.as_deref().unwrap_or(NEW_TUNNEL));
    let records = dns::find_cname_records(api, &zone.id, &desired.hostname).await?;
    let dns_action = match records.first() {
        Some(record) if tunnel_id.is_some() && record.content == target => Action::new(
            ActionType::NoOp,
            RESOURCE_DNS_RECORD,
            record.id.clone(),
            format!("{} already points to {}", record.name, target),
        ),
        Some(record) => Action::new(
            ActionType::Update,
            RESOURCE_DNS_RECORD,
            record.id.clone(),
            format!("point {} from {} to {}", record.name, record.content, target),
        ),
        None => Action::new(
            ActionType::Create,
            RESOURCE_DNS_RECORD,
            desired.hostname.clone(),
            format!("create CNAME {} -> {}", desired.hostname, target),
        ),
    };
    actions.push(dns_action.with_detail("content", serde_json::json!(target)));

    Ok(Plan::new(actions))
}
