//! Compensating steps for an interrupted run
//!
//! Mutations are recorded as they complete. When rollback is enabled and a
//! later stage fails, the ledger is replayed newest-first.

use crate::action::ApplyResult;
use crate::model::{DnsRecord, DnsRecordRequest};
use crate::provider::TunnelApi;

/// A completed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    TunnelCreated {
        account_id: String,
        tunnel_id: String,
    },
    IngressConfigured {
        account_id: String,
        tunnel_id: String,
    },
    DnsRecordCreated {
        zone_id: String,
        record_id: String,
    },
    DnsRecordUpdated {
        zone_id: String,
        previous: DnsRecord,
    },
}

impl Step {
    /// Stable identifier used in rollback results
    pub fn id(&self) -> String {
        match self {
            Step::TunnelCreated { tunnel_id, .. } => format!("tunnel-created-{}", tunnel_id),
            Step::IngressConfigured { tunnel_id, .. } => {
                format!("ingress-configured-{}", tunnel_id)
            }
            Step::DnsRecordCreated { record_id, .. } => format!("dns-created-{}", record_id),
            Step::DnsRecordUpdated { previous, .. } => format!("dns-updated-{}", previous.id),
        }
    }
}

/// Completed steps of the current run, oldest first
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    steps: Vec<Step>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: Step) {
        tracing::debug!("Recorded step {}", step.id());
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Undo every recorded step, newest first. Failures are collected, not raised.
pub async fn rollback(api: &dyn TunnelApi, ledger: Ledger) -> ApplyResult {
    let mut result = ApplyResult::new();
    let started = std::time::Instant::now();

    // a created tunnel takes its configuration with it
    let tunnel_created = ledger
        .steps
        .iter()
        .any(|s| matches!(s, Step::TunnelCreated { .. }));

    for step in ledger.steps.into_iter().rev() {
        let id = step.id();
        match step {
            Step::DnsRecordCreated { zone_id, record_id } => {
                tracing::info!("Rollback: deleting DNS record {}", record_id);
                let outcome = api.delete_dns_record(&zone_id, &record_id).await;
                result.record(id, outcome.map(|()| format!("deleted DNS record {}", record_id)));
            }
            Step::DnsRecordUpdated { zone_id, previous } => {
                tracing::info!(
                    "Rollback: restoring DNS record {} to {}",
                    previous.name,
                    previous.content
                );
                let request = DnsRecordRequest::from(&previous);
                let outcome = api.update_dns_record(&zone_id, &previous.id, &request).await;
                result.record(
                    id,
                    outcome.map(|_| {
                        format!("restored DNS record {} to {}", previous.name, previous.content)
                    }),
                );
            }
            Step::IngressConfigured { tunnel_id, .. } if tunnel_created => {
                result.add_success(
                    id,
                    format!("configuration of tunnel {} removed with it", tunnel_id),
                );
            }
            Step::IngressConfigured { tunnel_id, .. } => {
                tracing::warn!(
                    "Rollback: previous configuration of tunnel {} cannot be restored",
                    tunnel_id
                );
                result.add_failure(
                    id,
                    format!(
                        "previous configuration of reused tunnel {} is not restorable",
                        tunnel_id
                    ),
                );
            }
            Step::TunnelCreated {
                account_id,
                tunnel_id,
            } => {
                tracing::info!("Rollback: deleting tunnel {}", tunnel_id);
                let outcome = api.delete_tunnel(&account_id, &tunnel_id).await;
                result.record(id, outcome.map(|()| format!("deleted tunnel {}", tunnel_id)));
            }
        }
    }

    result.finish(started);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_keeps_completion_order() {
        let mut ledger = Ledger::new();
        assert!(ledger.is_empty());

        ledger.record(Step::TunnelCreated {
            account_id: "acc".to_string(),
            tunnel_id: "t1".to_string(),
        });
        ledger.record(Step::DnsRecordCreated {
            zone_id: "zone".to_string(),
            record_id: "r1".to_string(),
        });

        let ids: Vec<_> = ledger.steps().iter().map(Step::id).collect();
        assert_eq!(ids, vec!["tunnel-created-t1", "dns-created-r1"]);
    }
}
