//! TunnelFlow provisioning core
//!
//! Converges a provider's tunnel, tunnel configuration and DNS record onto a
//! desired `hostname -> service URL` mapping. Re-running with the same input
//! reuses what already exists instead of creating duplicates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 TunnelFlow CLI                   │
//! │              (tunnelflow up/down)                │
//! └─────────────────┬───────────────────────────────┘
//!                   │ DesiredState
//! ┌─────────────────▼───────────────────────────────┐
//! │               tunnelflow-cloud                   │
//! │  hostname -> zone -> tunnel -> ingress -> dns    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait TunnelApi { ... }                  │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │          tunnelflow-cloud-cloudflare             │
//! │            (Cloudflare v4 REST API)              │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tunnelflow_cloud::{DesiredState, ProvisionOptions, Provisioner};
//!
//! let desired = DesiredState::new("svc.example.com", "https://localhost:9090")?;
//! let report = Provisioner::new(&api, ProvisionOptions::default())
//!     .run(&desired)
//!     .await?;
//! println!("{}", report.credentials_json()?);
//! ```

pub mod action;
pub mod dns;
pub mod error;
pub mod hostname;
pub mod ids;
pub mod ingress;
pub mod model;
pub mod pipeline;
pub mod plan;
pub mod provider;
pub mod report;
pub mod saga;
pub mod secret;
pub mod teardown;
pub mod tunnel;
pub mod zone;

// Re-exports
pub use action::{Action, ActionResult, ActionType, ApplyResult, Plan, PlanSummary};
pub use dns::{DnsChange, reconcile_dns};
pub use error::{CloudError, Result};
pub use hostname::resolve;
pub use ingress::configure_ingress;
pub use model::{
    ConnectorCredentials, DEFAULT_SERVICE_URL, DesiredState, DnsRecord, DnsRecordRequest,
    DnsRecordSettings, IngressConfig, IngressRule, OriginRequest, Tunnel, WarpRouting, Zone,
    cname_target,
};
pub use pipeline::{ProvisionOptions, Provisioner, provision};
pub use plan::plan;
pub use provider::{AuthStatus, NewTunnel, TunnelApi, TunnelInfo, ZoneInfo};
pub use report::ProvisionReport;
pub use saga::{Ledger, Step};
pub use teardown::teardown;
pub use tunnel::{TunnelPolicy, reconcile_tunnel};
pub use zone::locate_zone;
