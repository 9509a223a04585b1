//! Cloudflare provider implementation

use crate::client::{ClientConfig, CloudflareClient};
use crate::error::CloudflareError;
use async_trait::async_trait;
use tunnelflow_cloud::{
    AuthStatus, DnsRecord, DnsRecordRequest, IngressConfig, NewTunnel, TunnelApi, TunnelInfo,
    ZoneInfo,
};

/// Cloudflare provider
pub struct CloudflareProvider {
    client: CloudflareClient,
}

impl CloudflareProvider {
    pub fn new(config: ClientConfig) -> crate::Result<Self> {
        Ok(Self {
            client: CloudflareClient::new(config)?,
        })
    }

    pub fn client(&self) -> &CloudflareClient {
        &self.client
    }
}

#[async_trait]
impl TunnelApi for CloudflareProvider {
    async fn verify_token(&self) -> tunnelflow_cloud::Result<AuthStatus> {
        match self.client.verify_token().await {
            Ok(token) if token.is_active() => Ok(AuthStatus::ok(token.id)),
            Ok(token) => Ok(AuthStatus::failed(format!(
                "token {} is {}",
                token.id, token.status
            ))),
            Err(CloudflareError::ApiError(errors)) => Ok(AuthStatus::failed(errors)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_zones(&self, name: &str) -> tunnelflow_cloud::Result<Vec<ZoneInfo>> {
        Ok(self.client.list_zones(name).await?)
    }

    async fn list_tunnels(
        &self,
        account_id: &str,
        name: &str,
    ) -> tunnelflow_cloud::Result<Vec<TunnelInfo>> {
        Ok(self.client.list_tunnels(account_id, name).await?)
    }

    async fn get_tunnel_token(
        &self,
        account_id: &str,
        tunnel_id: &str,
    ) -> tunnelflow_cloud::Result<String> {
        Ok(self.client.get_tunnel_token(account_id, tunnel_id).await?)
    }

    async fn create_tunnel(
        &self,
        account_id: &str,
        tunnel: &NewTunnel,
    ) -> tunnelflow_cloud::Result<TunnelInfo> {
        Ok(self.client.create_tunnel(account_id, tunnel).await?)
    }

    async fn delete_tunnel(
        &self,
        account_id: &str,
        tunnel_id: &str,
    ) -> tunnelflow_cloud::Result<()> {
        Ok(self.client.delete_tunnel(account_id, tunnel_id).await?)
    }

    async fn put_tunnel_configuration(
        &self,
        account_id: &str,
        tunnel_id: &str,
        config: &IngressConfig,
    ) -> tunnelflow_cloud::Result<()> {
        Ok(self
            .client
            .put_tunnel_configuration(account_id, tunnel_id, config)
            .await?)
    }

    async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> tunnelflow_cloud::Result<Vec<DnsRecord>> {
        Ok(self
            .client
            .list_dns_records(zone_id, record_type, name)
            .await?)
    }

    async fn create_dns_record(
        &self,
        zone_id: &str,
        record: &DnsRecordRequest,
    ) -> tunnelflow_cloud::Result<DnsRecord> {
        Ok(self.client.create_dns_record(zone_id, record).await?)
    }

    async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordRequest,
    ) -> tunnelflow_cloud::Result<DnsRecord> {
        Ok(self
            .client
            .update_dns_record(zone_id, record_id, record)
            .await?)
    }

    async fn delete_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> tunnelflow_cloud::Result<()> {
        Ok(self.client.delete_dns_record(zone_id, record_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunnelflow_cloud::CloudError;

    fn unreachable_provider() -> CloudflareProvider {
        // nothing listens on the discard port
        let config = ClientConfig::new("token123")
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .unwrap();
        CloudflareProvider::new(config).unwrap()
    }

    #[test]
    fn test_transport_failure_is_provider_error() {
        let provider = unreachable_provider();
        let err = tokio_test::block_on(provider.list_zones("example.com")).unwrap_err();
        assert!(matches!(err, CloudError::Provider(_)));
    }

    #[test]
    fn test_verify_propagates_transport_failure() {
        // only an API rejection counts as an unauthenticated token
        let provider = unreachable_provider();
        assert!(tokio_test::block_on(provider.verify_token()).is_err());
    }
}
