//! Action types for tunnel and DNS reconciliation

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resource kinds touched by a run
pub const RESOURCE_TUNNEL: &str = "tunnel";
pub const RESOURCE_INGRESS: &str = "tunnel-configuration";
pub const RESOURCE_DNS_RECORD: &str = "dns-record";

/// One step of a [`Plan`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// `<type>-<resource>-<resource id>`
    pub id: String,
    pub action_type: ActionType,

    /// One of the `RESOURCE_*` constants
    pub resource_type: String,

    /// Provider id, or the name when the resource does not exist yet
    pub resource_id: String,

    pub description: String,

    /// Values the action would write (target content, TLS flag, policy)
    pub details: HashMap<String, serde_json::Value>,
}

impl Action {
    pub fn new(
        action_type: ActionType,
        resource_type: &str,
        resource_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let resource_id = resource_id.into();
        Self {
            id: format!("{}-{}-{}", action_type, resource_type, resource_id),
            action_type,
            resource_type: resource_type.to_string(),
            resource_id,
            description: description.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

/// What a run does to one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Create,
    /// In-place change (ingress replacement, CNAME re-point)
    Update,
    Delete,
    /// Existing resource already matches
    NoOp,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "create",
            ActionType::Update => "update",
            ActionType::Delete => "delete",
            ActionType::NoOp => "no-op",
        }
    }

    /// Whether the action mutates the provider
    pub fn is_change(&self) -> bool {
        !matches!(self, ActionType::NoOp)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a rollback or teardown. Failures are collected, not raised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyResult {
    pub succeeded: Vec<ActionResult>,
    pub failed: Vec<ActionResult>,

    /// Wall time of the whole pass
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn add_success(&mut self, action_id: String, message: String) {
        self.succeeded.push(ActionResult::ok(action_id, message));
    }

    pub fn add_failure(&mut self, action_id: String, error: String) {
        self.failed.push(ActionResult::failed(action_id, error));
    }

    /// File a provider call's outcome under `action_id`
    pub fn record(&mut self, action_id: String, outcome: Result<String>) {
        match outcome {
            Ok(message) => self.add_success(action_id, message),
            Err(e) => self.add_failure(action_id, e.to_string()),
        }
    }

    pub(crate) fn finish(&mut self, started: std::time::Instant) {
        self.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    }
}

/// Result of a single action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_id: String,
    pub success: bool,

    /// Human-readable summary; empty on failure
    pub message: String,

    pub error: Option<String>,
}

impl ActionResult {
    fn ok(action_id: String, message: String) -> Self {
        Self {
            action_id,
            success: true,
            message,
            error: None,
        }
    }

    fn failed(action_id: String, error: String) -> Self {
        Self {
            action_id,
            success: false,
            message: String::new(),
            error: Some(error),
        }
    }
}

/// Ordered actions a provisioning run would perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub actions: Vec<Action>,
    pub has_changes: bool,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        let has_changes = actions.iter().any(|a| a.action_type.is_change());
        Self {
            actions,
            has_changes,
        }
    }

    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Actions touching one kind of resource, e.g. [`RESOURCE_TUNNEL`]
    pub fn actions_for(&self, resource_type: &str) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.resource_type == resource_type)
            .collect()
    }

    pub fn summary(&self) -> PlanSummary {
        self.actions
            .iter()
            .fold(PlanSummary::default(), |mut summary, action| {
                match action.action_type {
                    ActionType::Create => summary.create += 1,
                    ActionType::Update => summary.update += 1,
                    ActionType::Delete => summary.delete += 1,
                    ActionType::NoOp => summary.unchanged += 1,
                }
                summary
            })
    }
}

/// Action counts per type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub unchanged: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to create, {} to update, {} to delete, {} unchanged",
            self.create, self.update, self.delete, self.unchanged
        )
    }
}
