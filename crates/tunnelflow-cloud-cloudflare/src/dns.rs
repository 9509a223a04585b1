//! DNS record endpoints

use crate::client::CloudflareClient;
use crate::error::Result;
use serde::de::IgnoredAny;
use tunnelflow_cloud::{DnsRecord, DnsRecordRequest};

impl CloudflareClient {
    /// `GET /zones/<zone>/dns_records?type=<type>&name=<name>`
    pub async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let path = format!("/zones/{}/dns_records", zone_id);
        self.get(&path, &[("type", record_type), ("name", name)])
            .await
    }

    /// `POST /zones/<zone>/dns_records`
    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        let path = format!("/zones/{}/dns_records", zone_id);
        self.post(&path, record).await
    }

    /// `PATCH /zones/<zone>/dns_records/<record>`
    pub async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        let path = format!("/zones/{}/dns_records/{}", zone_id, record_id);
        self.patch(&path, record).await
    }

    /// `DELETE /zones/<zone>/dns_records/<record>`
    pub async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let path = format!("/zones/{}/dns_records/{}", zone_id, record_id);
        let _: IgnoredAny = self.delete(&path).await?;
        Ok(())
    }
}
