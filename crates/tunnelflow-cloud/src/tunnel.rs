//! Tunnel reconciliation

use crate::error::{CloudError, Result};
use crate::model::{CONFIG_SRC_CLOUDFLARE, Tunnel};
use crate::provider::{NewTunnel, TunnelApi, TunnelInfo};
use crate::secret;
use serde::{Deserialize, Serialize};

/// What to do with tunnels that already carry the desired name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TunnelPolicy {
    /// Reuse the first active tunnel and recover its secret from its token
    #[default]
    Reuse,
    /// Delete every active tunnel with the name, then create a fresh one.
    /// Connectors running with the old secrets stop working.
    Recreate,
}

impl std::fmt::Display for TunnelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TunnelPolicy::Reuse => write!(f, "reuse"),
            TunnelPolicy::Recreate => write!(f, "recreate"),
        }
    }
}

impl std::str::FromStr for TunnelPolicy {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reuse" => Ok(TunnelPolicy::Reuse),
            "recreate" => Ok(TunnelPolicy::Recreate),
            other => Err(CloudError::Validation(format!(
                "unknown tunnel policy '{}' (expected reuse or recreate)",
                other
            ))),
        }
    }
}

/// Active tunnels named exactly `name`, in API list order
pub async fn find_tunnels(
    api: &dyn TunnelApi,
    account_id: &str,
    name: &str,
) -> Result<Vec<TunnelInfo>> {
    tracing::debug!("Listing tunnels named {}", name);
    let tunnels = api.list_tunnels(account_id, name).await?;
    Ok(tunnels
        .into_iter()
        .filter(|t| !t.deleted && t.name == name)
        .collect())
}

/// Find or create the tunnel for `name` according to `policy`
///
/// The tunnel id is returned as the provider reported it; callers check its
/// shape once a created tunnel has been recorded for rollback.
pub async fn reconcile_tunnel(
    api: &dyn TunnelApi,
    account_id: &str,
    name: &str,
    policy: TunnelPolicy,
) -> Result<Tunnel> {
    let existing = find_tunnels(api, account_id, name).await?;

    match policy {
        TunnelPolicy::Reuse => match existing.into_iter().next() {
            Some(found) => Ok(reuse_tunnel(api, account_id, found).await),
            None => create_tunnel(api, account_id, name).await,
        },
        TunnelPolicy::Recreate => {
            for old in &existing {
                tracing::info!("Deleting tunnel {} ({})", old.name, old.id);
                api.delete_tunnel(account_id, &old.id).await?;
            }
            create_tunnel(api, account_id, name).await
        }
    }
}

async fn reuse_tunnel(api: &dyn TunnelApi, account_id: &str, found: TunnelInfo) -> Tunnel {
    tracing::info!("Reusing tunnel {} ({})", found.name, found.id);

    let token = match api.get_tunnel_token(account_id, &found.id).await {
        Ok(token) => Some(token),
        Err(e) => {
            tracing::warn!("Could not fetch connector token for {}: {}", found.id, e);
            None
        }
    };

    let secret = token
        .as_deref()
        .and_then(|token| match secret::decode_token(token) {
            Ok(payload) => Some(payload.secret),
            Err(e) => {
                tracing::warn!("Could not decode connector token for {}: {}", found.id, e);
                None
            }
        });

    Tunnel {
        id: found.id,
        name: found.name,
        secret,
        token,
        created: false,
    }
}

async fn create_tunnel(api: &dyn TunnelApi, account_id: &str, name: &str) -> Result<Tunnel> {
    tracing::info!("Creating tunnel {}", name);

    let request = NewTunnel {
        name: name.to_string(),
        config_src: CONFIG_SRC_CLOUDFLARE.to_string(),
        tunnel_secret: secret::generate_secret(),
    };
    let created = api.create_tunnel(account_id, &request).await?;

    Ok(Tunnel {
        id: created.id,
        name: created.name,
        secret: Some(request.tunnel_secret),
        token: created.token,
        created: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("reuse".parse::<TunnelPolicy>().unwrap(), TunnelPolicy::Reuse);
        assert_eq!(
            "Recreate".parse::<TunnelPolicy>().unwrap(),
            TunnelPolicy::Recreate
        );
        assert!("delete-all".parse::<TunnelPolicy>().is_err());
    }

    #[test]
    fn test_policy_default_is_reuse() {
        assert_eq!(TunnelPolicy::default(), TunnelPolicy::Reuse);
        assert_eq!(TunnelPolicy::Recreate.to_string(), "recreate");
    }
}
