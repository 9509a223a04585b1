//! Cloudflare provider for TunnelFlow
//!
//! Implements [`tunnelflow_cloud::TunnelApi`] on top of the Cloudflare v4
//! REST API: zones, Cloudflare Tunnels (`cfd_tunnel`) and DNS records.
//!
//! # Requirements
//!
//! - An API token with `Zone:Read`, `DNS:Edit` and
//!   `Account:Cloudflare Tunnel:Edit` permissions
//!
//! # Example
//!
//! ```ignore
//! use tunnelflow_cloud::{DesiredState, provision};
//! use tunnelflow_cloud_cloudflare::{ClientConfig, CloudflareProvider};
//!
//! let provider = CloudflareProvider::new(ClientConfig::new(token)?)?;
//! let desired = DesiredState::new("svc.example.com", "http://localhost:3010")?;
//! let report = provision(&provider, &desired).await?;
//! ```

pub mod client;
pub mod dns;
pub mod error;
pub mod provider;
pub mod tunnel;
pub mod verify;
pub mod zone;

pub use client::{CLOUDFLARE_API_BASE, ClientConfig, CloudflareClient};
pub use error::{CloudflareError, Result};
pub use provider::CloudflareProvider;
pub use verify::TokenVerification;
