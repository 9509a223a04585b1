//! Zone lookup

use crate::client::CloudflareClient;
use crate::error::Result;
use serde::Deserialize;
use tunnelflow_cloud::ZoneInfo;

impl CloudflareClient {
    /// `GET /zones?name=<name>`
    pub async fn list_zones(&self, name: &str) -> Result<Vec<ZoneInfo>> {
        let zones: Vec<ApiZone> = self.get("/zones", &[("name", name)]).await?;
        Ok(zones.into_iter().map(ZoneInfo::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct ApiZone {
    id: String,
    name: String,
    #[serde(default)]
    account: Option<ApiAccount>,
}

#[derive(Debug, Deserialize)]
struct ApiAccount {
    #[serde(default)]
    id: Option<String>,
}

impl From<ApiZone> for ZoneInfo {
    fn from(zone: ApiZone) -> Self {
        ZoneInfo {
            id: zone.id,
            name: zone.name,
            account_id: zone.account.and_then(|a| a.id),
        }
    }
}
