//! Provisioning results handed to the operator

use crate::action::ActionType;
use crate::error::Result;
use crate::model::ConnectorCredentials;
use serde::Serialize;

/// Everything a downstream connector deployment needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub zone_id: String,
    pub account_id: String,
    pub tunnel_id: String,
    pub tunnel_name: String,
    pub hostname: String,
    pub cname_target: String,
    pub service_url: String,

    /// Connector token; absent when it could not be fetched for a reused tunnel
    pub token: Option<String>,

    /// Base64 tunnel secret; absent when the token could not be decoded
    pub secret: Option<String>,

    /// `create` for a new tunnel, `no_op` when an existing one was reused
    pub tunnel_action: ActionType,

    /// `create` or `update`
    pub dns_action: ActionType,

    pub dns_record_id: String,
}

impl ProvisionReport {
    pub fn credentials(&self) -> ConnectorCredentials {
        ConnectorCredentials {
            account_tag: self.account_id.clone(),
            tunnel_secret: self.secret.clone().unwrap_or_default(),
            tunnel_id: self.tunnel_id.clone(),
            endpoint: String::new(),
        }
    }

    /// Compact single-line JSON of the connector credentials
    pub fn credentials_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.credentials())?)
    }

    /// Whole report including credentials, as one JSON object
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        value["credentials"] = serde_json::to_value(self.credentials())?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(secret: Option<&str>) -> ProvisionReport {
        ProvisionReport {
            zone_id: "023e105f4ecef8ad9ca31a8372d0c353".to_string(),
            account_id: "699d98642c564d2e855e9661899b7252".to_string(),
            tunnel_id: "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415".to_string(),
            tunnel_name: "svc".to_string(),
            hostname: "svc.example.com".to_string(),
            cname_target: "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415.cfargotunnel.com".to_string(),
            service_url: "http://localhost:3010".to_string(),
            token: None,
            secret: secret.map(str::to_string),
            tunnel_action: ActionType::NoOp,
            dns_action: ActionType::Update,
            dns_record_id: "372e67954025e0ba6aaa6d586b9e0b59".to_string(),
        }
    }

    #[test]
    fn test_credentials_json_line() {
        assert_eq!(
            report(Some("c2VjcmV0")).credentials_json().unwrap(),
            r#"{"AccountTag":"699d98642c564d2e855e9661899b7252","TunnelSecret":"c2VjcmV0","TunnelID":"f70ff985-a4ef-4643-bbbc-4a0ed4fc8415","Endpoint":""}"#
        );
    }

    #[test]
    fn test_credentials_without_secret() {
        let creds = report(None).credentials();
        assert_eq!(creds.tunnel_secret, "");
        assert_eq!(creds.endpoint, "");
    }

    #[test]
    fn test_to_json_includes_credentials() {
        let json = report(Some("c2VjcmV0")).to_json().unwrap();
        assert_eq!(json["tunnel_name"], "svc");
        assert_eq!(json["dns_action"], "update");
        assert_eq!(json["tunnel_action"], "no_op");
        assert_eq!(json["credentials"]["TunnelSecret"], "c2VjcmV0");
    }
}
