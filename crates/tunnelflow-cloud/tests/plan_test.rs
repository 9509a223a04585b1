mod common;

use common::FakeApi;
use tunnelflow_cloud::action::{RESOURCE_DNS_RECORD, RESOURCE_INGRESS, RESOURCE_TUNNEL};
use tunnelflow_cloud::{
    ActionType, CloudError, DesiredState, TunnelPolicy, plan, provision, teardown,
};

const EXISTING_TUNNEL: &str = "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415";
const EXISTING_SECRET: &str = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=";

const MUTATIONS: [&str; 6] = [
    "create_tunnel",
    "delete_tunnel",
    "put_tunnel_configuration",
    "create_dns_record",
    "update_dns_record",
    "delete_dns_record",
];

fn desired() -> DesiredState {
    DesiredState::new("svc.example.com", "https://localhost:9090").unwrap()
}

fn assert_read_only(api: &FakeApi) {
    for method in MUTATIONS {
        assert_eq!(api.count(method), 0, "{} was called", method);
    }
}

#[tokio::test]
async fn test_plan_for_empty_account() {
    let api = FakeApi::new();
    let plan = plan(&api, &desired(), TunnelPolicy::Reuse).await.unwrap();

    assert_read_only(&api);
    assert!(plan.has_changes);
    assert_eq!(plan.actions_for(RESOURCE_TUNNEL)[0].action_type, ActionType::Create);
    assert_eq!(plan.actions_for(RESOURCE_INGRESS)[0].action_type, ActionType::Update);
    assert_eq!(
        plan.actions_for(RESOURCE_INGRESS)[0].details["no_tls_verify"],
        true
    );
    assert_eq!(plan.actions_for(RESOURCE_DNS_RECORD)[0].action_type, ActionType::Create);
}

#[tokio::test]
async fn test_plan_after_provisioning_has_no_dns_change() {
    let api = FakeApi::new();
    let report = provision(&api, &desired()).await.unwrap();
    let before = api.calls().len();

    let plan = plan(&api, &desired(), TunnelPolicy::Reuse).await.unwrap();

    let tunnel = plan.actions_for(RESOURCE_TUNNEL)[0];
    assert_eq!(tunnel.action_type, ActionType::NoOp);
    assert_eq!(tunnel.resource_id, report.tunnel_id);

    let dns = plan.actions_for(RESOURCE_DNS_RECORD)[0];
    assert_eq!(dns.action_type, ActionType::NoOp);
    assert_eq!(dns.details["content"], report.cname_target);

    let calls = api.calls()[before..].to_vec();
    assert_eq!(calls, vec!["list_zones", "list_tunnels", "list_dns_records"]);
}

#[tokio::test]
async fn test_plan_recreate_lists_deletions() {
    let api = FakeApi::new();
    api.add_tunnel(EXISTING_TUNNEL, "svc", EXISTING_SECRET);
    api.add_record(
        "372e67954025e0ba6aaa6d586b9e0b59",
        "svc.example.com",
        &format!("{}.cfargotunnel.com", EXISTING_TUNNEL),
    );

    let plan = plan(&api, &desired(), TunnelPolicy::Recreate).await.unwrap();

    assert_read_only(&api);
    let summary = plan.summary();
    assert_eq!(summary.delete, 1);
    assert_eq!(summary.create, 1);
    // the new tunnel id is unknown, so the record must change
    assert_eq!(
        plan.actions_for(RESOURCE_DNS_RECORD)[0].action_type,
        ActionType::Update
    );
}

#[tokio::test]
async fn test_teardown_removes_tunnel_and_record() {
    let api = FakeApi::new();
    provision(&api, &desired()).await.unwrap();

    let result = teardown(&api, "svc.example.com").await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.succeeded.len(), 2);
    assert!(api.records().is_empty());
    assert!(api.active_tunnels("svc").is_empty());

    let again = teardown(&api, "svc.example.com").await.unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_teardown_keeps_foreign_cname() {
    let api = FakeApi::new();
    api.add_record(
        "372e67954025e0ba6aaa6d586b9e0b59",
        "svc.example.com",
        "svc.herokuapp.com",
    );

    let result = teardown(&api, "svc.example.com").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(api.records().len(), 1);
    assert_eq!(api.count("delete_dns_record"), 0);
}

#[test]
fn test_teardown_validates_hostname() {
    let api = FakeApi::new();
    let err = tokio_test::block_on(teardown(&api, "example.com")).unwrap_err();

    assert!(matches!(err, CloudError::Validation(_)));
    assert!(api.calls().is_empty());
}
