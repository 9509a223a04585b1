#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tunnelflow_cloud::secret::{TokenPayload, encode_token};
use tunnelflow_cloud::{
    AuthStatus, CloudError, DnsRecord, DnsRecordRequest, IngressConfig, NewTunnel, Result,
    TunnelApi, TunnelInfo, ZoneInfo,
};

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const ACCOUNT_ID: &str = "699d98642c564d2e855e9661899b7252";

#[derive(Debug, Clone)]
pub struct FakeTunnel {
    pub info: TunnelInfo,
    pub secret: String,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub zones: Vec<ZoneInfo>,
    pub tunnels: Vec<FakeTunnel>,
    pub configs: HashMap<String, IngressConfig>,
    pub records: Vec<DnsRecord>,
    pub calls: Vec<String>,
    pub created_secrets: Vec<String>,
    pub fail_on: Option<&'static str>,
    pub token_unavailable: bool,
    /// Created DNS records get an id that is not 32 hex characters
    pub malformed_record_ids: bool,
    next_id: u64,
}

/// In-memory provider that records every call by method name
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    /// Provider with the `example.com` zone and nothing else
    pub fn new() -> Self {
        let state = FakeState {
            zones: vec![ZoneInfo {
                id: ZONE_ID.to_string(),
                name: "example.com".to_string(),
                account_id: Some(ACCOUNT_ID.to_string()),
            }],
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_zones(zones: Vec<ZoneInfo>) -> Self {
        let api = Self::new();
        api.state.lock().unwrap().zones = zones;
        api
    }

    pub fn add_tunnel(&self, id: &str, name: &str, secret: &str) {
        self.state.lock().unwrap().tunnels.push(FakeTunnel {
            info: TunnelInfo {
                id: id.to_string(),
                name: name.to_string(),
                deleted: false,
                token: None,
            },
            secret: secret.to_string(),
        });
    }

    pub fn add_deleted_tunnel(&self, id: &str, name: &str) {
        self.add_tunnel(id, name, "ZGVsZXRlZA==");
        self.state.lock().unwrap().tunnels.last_mut().unwrap().info.deleted = true;
    }

    pub fn add_record(&self, id: &str, name: &str, content: &str) {
        self.state.lock().unwrap().records.push(DnsRecord {
            id: id.to_string(),
            name: name.to_string(),
            record_type: "CNAME".to_string(),
            content: content.to_string(),
            proxied: false,
            settings: Default::default(),
        });
    }

    pub fn fail_on(&self, method: &'static str) {
        self.state.lock().unwrap().fail_on = Some(method);
    }

    pub fn malformed_record_ids(&self) {
        self.state.lock().unwrap().malformed_record_ids = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == method).count()
    }

    pub fn active_tunnels(&self, name: &str) -> Vec<FakeTunnel> {
        self.state
            .lock()
            .unwrap()
            .tunnels
            .iter()
            .filter(|t| !t.info.deleted && t.info.name == name)
            .cloned()
            .collect()
    }

    pub fn records(&self) -> Vec<DnsRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn config(&self, tunnel_id: &str) -> Option<IngressConfig> {
        self.state.lock().unwrap().configs.get(tunnel_id).cloned()
    }

    fn enter(&self, method: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method.to_string());
        if state.fail_on == Some(method) {
            return Err(CloudError::Provider(format!(
                r#"[{{"code":10000,"message":"{} failed"}}]"#,
                method
            )));
        }
        Ok(state)
    }
}

impl FakeState {
    fn next_hex_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:032x}", 0xabc000 + self.next_id)
    }
}

#[async_trait]
impl TunnelApi for FakeApi {
    async fn verify_token(&self) -> Result<AuthStatus> {
        let _state = self.enter("verify_token")?;
        Ok(AuthStatus::ok("token-id"))
    }

    async fn list_zones(&self, name: &str) -> Result<Vec<ZoneInfo>> {
        let state = self.enter("list_zones")?;
        Ok(state.zones.iter().filter(|z| z.name == name).cloned().collect())
    }

    async fn list_tunnels(&self, _account_id: &str, name: &str) -> Result<Vec<TunnelInfo>> {
        let state = self.enter("list_tunnels")?;
        Ok(state
            .tunnels
            .iter()
            .filter(|t| t.info.name == name)
            .map(|t| t.info.clone())
            .collect())
    }

    async fn get_tunnel_token(&self, account_id: &str, tunnel_id: &str) -> Result<String> {
        let state = self.enter("get_tunnel_token")?;
        if state.token_unavailable {
            return Err(CloudError::Provider("token unavailable".to_string()));
        }
        let tunnel = state
            .tunnels
            .iter()
            .find(|t| t.info.id == tunnel_id)
            .ok_or_else(|| CloudError::Provider("no such tunnel".to_string()))?;
        encode_token(&TokenPayload {
            account_tag: account_id.to_string(),
            tunnel_id: tunnel_id.to_string(),
            secret: tunnel.secret.clone(),
        })
    }

    async fn create_tunnel(&self, account_id: &str, tunnel: &NewTunnel) -> Result<TunnelInfo> {
        let mut state = self.enter("create_tunnel")?;
        let id = uuid::Uuid::new_v4().to_string();
        let token = encode_token(&TokenPayload {
            account_tag: account_id.to_string(),
            tunnel_id: id.clone(),
            secret: tunnel.tunnel_secret.clone(),
        })?;
        let info = TunnelInfo {
            id,
            name: tunnel.name.clone(),
            deleted: false,
            token: Some(token),
        };
        state.created_secrets.push(tunnel.tunnel_secret.clone());
        state.tunnels.push(FakeTunnel {
            info: info.clone(),
            secret: tunnel.tunnel_secret.clone(),
        });
        Ok(info)
    }

    async fn delete_tunnel(&self, _account_id: &str, tunnel_id: &str) -> Result<()> {
        let mut state = self.enter("delete_tunnel")?;
        for tunnel in state.tunnels.iter_mut().filter(|t| t.info.id == tunnel_id) {
            tunnel.info.deleted = true;
        }
        state.configs.remove(tunnel_id);
        Ok(())
    }

    async fn put_tunnel_configuration(
        &self,
        _account_id: &str,
        tunnel_id: &str,
        config: &IngressConfig,
    ) -> Result<()> {
        let mut state = self.enter("put_tunnel_configuration")?;
        state.configs.insert(tunnel_id.to_string(), config.clone());
        Ok(())
    }

    async fn list_dns_records(
        &self,
        _zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let state = self.enter("list_dns_records")?;
        Ok(state
            .records
            .iter()
            .filter(|r| r.record_type == record_type && r.name == name)
            .cloned()
            .collect())
    }

    async fn create_dns_record(
        &self,
        _zone_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        let mut state = self.enter("create_dns_record")?;
        let id = if state.malformed_record_ids {
            "BAD-ID".to_string()
        } else {
            state.next_hex_id()
        };
        let created = DnsRecord {
            id,
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            content: record.content.clone(),
            proxied: record.proxied,
            settings: record.settings.clone(),
        };
        state.records.push(created.clone());
        Ok(created)
    }

    async fn update_dns_record(
        &self,
        _zone_id: &str,
        record_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        let mut state = self.enter("update_dns_record")?;
        let existing = state
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| CloudError::Provider("no such record".to_string()))?;
        existing.name = record.name.clone();
        existing.content = record.content.clone();
        existing.proxied = record.proxied;
        existing.settings = record.settings.clone();
        Ok(existing.clone())
    }

    async fn delete_dns_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        let mut state = self.enter("delete_dns_record")?;
        state.records.retain(|r| r.id != record_id);
        Ok(())
    }
}
