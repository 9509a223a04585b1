//! Sequential provisioning pipeline
//!
//! zone lookup -> tunnel -> ingress -> DNS -> report. Each stage consumes the
//! previous stage's output; the first error stops the run.

use crate::action::{ActionType, ApplyResult};
use crate::dns::{self, DnsChange};
use crate::error::Result;
use crate::ids::{ensure_hex_id, ensure_uuid};
use crate::ingress;
use crate::model::{DesiredState, cname_target};
use crate::provider::TunnelApi;
use crate::report::ProvisionReport;
use crate::saga::{self, Ledger, Step};
use crate::tunnel::{self, TunnelPolicy};
use crate::zone;
use serde::{Deserialize, Serialize};

/// Run-wide behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionOptions {
    pub policy: TunnelPolicy,

    /// Undo this run's mutations when a later stage fails
    pub rollback: bool,
}

/// Converges the provider onto a [`DesiredState`]
pub struct Provisioner<'a> {
    api: &'a dyn TunnelApi,
    options: ProvisionOptions,
    rollback: Option<ApplyResult>,
}

impl<'a> Provisioner<'a> {
    pub fn new(api: &'a dyn TunnelApi, options: ProvisionOptions) -> Self {
        Self {
            api,
            options,
            rollback: None,
        }
    }

    pub fn options(&self) -> ProvisionOptions {
        self.options
    }

    /// Outcome of the rollback performed by the last failed run, if any
    pub fn rollback_result(&self) -> Option<&ApplyResult> {
        self.rollback.as_ref()
    }

    pub async fn run(&mut self, desired: &DesiredState) -> Result<ProvisionReport> {
        self.rollback = None;
        let mut ledger = Ledger::new();

        match self.execute(desired, &mut ledger).await {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::debug!("Provisioning {} failed: {}", desired.hostname, e);
                if self.options.rollback && !ledger.is_empty() {
                    tracing::warn!("Rolling back {} completed step(s)", ledger.steps().len());
                    self.rollback = Some(saga::rollback(self.api, ledger).await);
                }
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        desired: &DesiredState,
        ledger: &mut Ledger,
    ) -> Result<ProvisionReport> {
        let zone = zone::locate_zone(self.api, &desired.root_domain).await?;

        let tunnel = tunnel::reconcile_tunnel(
            self.api,
            &zone.account_id,
            &desired.tunnel_name,
            self.options.policy,
        )
        .await?;
        if tunnel.created {
            ledger.record(Step::TunnelCreated {
                account_id: zone.account_id.clone(),
                tunnel_id: tunnel.id.clone(),
            });
        }
        ensure_uuid("tunnel id", &tunnel.id)?;

        ingress::configure_ingress(
            self.api,
            &zone.account_id,
            &tunnel.id,
            &desired.hostname,
            &desired.service_url,
        )
        .await?;
        ledger.record(Step::IngressConfigured {
            account_id: zone.account_id.clone(),
            tunnel_id: tunnel.id.clone(),
        });

        let change = dns::reconcile_dns(self.api, &zone.id, &desired.hostname, &tunnel.id).await?;
        let dns_action = match &change {
            DnsChange::Created(record) => {
                ledger.record(Step::DnsRecordCreated {
                    zone_id: zone.id.clone(),
                    record_id: record.id.clone(),
                });
                ActionType::Create
            }
            DnsChange::Updated { previous, .. } => {
                ledger.record(Step::DnsRecordUpdated {
                    zone_id: zone.id.clone(),
                    previous: previous.clone(),
                });
                ActionType::Update
            }
        };
        ensure_hex_id("dns record id", &change.record().id)?;

        Ok(ProvisionReport {
            cname_target: cname_target(&tunnel.id),
            zone_id: zone.id,
            account_id: zone.account_id,
            tunnel_id: tunnel.id,
            tunnel_name: tunnel.name,
            hostname: desired.hostname.clone(),
            service_url: desired.service_url.clone(),
            token: tunnel.token,
            secret: tunnel.secret,
            tunnel_action: if tunnel.created {
                ActionType::Create
            } else {
                ActionType::NoOp
            },
            dns_action,
            dns_record_id: change.record().id.clone(),
        })
    }
}

/// Provision with default options
pub async fn provision(api: &dyn TunnelApi, desired: &DesiredState) -> Result<ProvisionReport> {
    Provisioner::new(api, ProvisionOptions::default())
        .run(desired)
        .await
}
