//! Cloudflare Tunnel (cfd_tunnel) endpoints

use crate::client::CloudflareClient;
use crate::error::Result;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tunnelflow_cloud::{IngressConfig, NewTunnel, TunnelInfo};

impl CloudflareClient {
    /// `GET /accounts/<account>/cfd_tunnel?name=<name>&is_deleted=false`
    pub async fn list_tunnels(&self, account_id: &str, name: &str) -> Result<Vec<TunnelInfo>> {
        let path = format!("/accounts/{}/cfd_tunnel", account_id);
        let tunnels: Vec<ApiTunnel> = self
            .get(&path, &[("name", name), ("is_deleted", "false")])
            .await?;
        Ok(tunnels.into_iter().map(TunnelInfo::from).collect())
    }

    /// `GET /accounts/<account>/cfd_tunnel/<tunnel>/token`
    pub async fn get_tunnel_token(&self, account_id: &str, tunnel_id: &str) -> Result<String> {
        let path = format!("/accounts/{}/cfd_tunnel/{}/token", account_id, tunnel_id);
        self.get(&path, &[]).await
    }

    /// `POST /accounts/<account>/cfd_tunnel`
    pub async fn create_tunnel(&self, account_id: &str, tunnel: &NewTunnel) -> Result<TunnelInfo> {
        let path = format!("/accounts/{}/cfd_tunnel", account_id);
        let created: ApiTunnel = self.post(&path, tunnel).await?;
        Ok(created.into())
    }

    /// `DELETE /accounts/<account>/cfd_tunnel/<tunnel>`
    pub async fn delete_tunnel(&self, account_id: &str, tunnel_id: &str) -> Result<()> {
        let path = format!("/accounts/{}/cfd_tunnel/{}", account_id, tunnel_id);
        let _: IgnoredAny = self.delete(&path).await?;
        Ok(())
    }

    /// `PUT /accounts/<account>/cfd_tunnel/<tunnel>/configurations`
    pub async fn put_tunnel_configuration(
        &self,
        account_id: &str,
        tunnel_id: &str,
        config: &IngressConfig,
    ) -> Result<()> {
        let path = format!(
            "/accounts/{}/cfd_tunnel/{}/configurations",
            account_id, tunnel_id
        );
        let _: IgnoredAny = self.put(&path, &ConfigurationRequest { config }).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiTunnel {
    id: String,
    name: String,
    #[serde(default)]
    deleted_at: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl From<ApiTunnel> for TunnelInfo {
    fn from(tunnel: ApiTunnel) -> Self {
        TunnelInfo {
            id: tunnel.id,
            name: tunnel.name,
            deleted: tunnel.deleted_at.is_some(),
            token: tunnel.token.filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfigurationRequest<'a> {
    config: &'a IngressConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_tunnel_deleted_at() {
        let live: ApiTunnel =
            serde_json::from_str(r#"{"id":"t","name":"svc","deleted_at":null}"#).unwrap();
        assert!(!TunnelInfo::from(live).deleted);

        let gone: ApiTunnel = serde_json::from_str(
            r#"{"id":"t","name":"svc","deleted_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(TunnelInfo::from(gone).deleted);
    }

    #[test]
    fn test_configuration_request_shape() {
        let config = IngressConfig::route("svc.example.com", "http://localhost:3010");
        let json = serde_json::to_value(ConfigurationRequest { config: &config }).unwrap();
        assert_eq!(json["config"]["ingress"][0]["hostname"], "svc.example.com");
        assert_eq!(json["config"]["warp-routing"]["enabled"], false);
    }
}
