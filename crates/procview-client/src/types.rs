//! Projections of workflow engine resources.
//!
//! Each struct is an allow-list: fields not named here are dropped when
//! the engine's payload is decoded.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Process instances
// ─────────────────────────────────────────────────────────────────────────────

/// A process instance card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub business_key: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Variables
// ─────────────────────────────────────────────────────────────────────────────

/// A process or task variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(rename = "type", default)]
    pub value_type: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tasks and subprocesses
// ─────────────────────────────────────────────────────────────────────────────

/// A user task attached to a process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTask {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// A subprocess started by a process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subprocess {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// A history event of a process instance or task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub details: String,
}

impl Event {
    /// Case-insensitive substring match on type or details.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.event_type.to_lowercase().contains(&needle)
            || self.details.to_lowercase().contains(&needle)
    }
}

/// Owner of an event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    ProcessInstance,
    Task,
}

impl EventScope {
    /// Path segment used by the engine API.
    pub fn as_path(&self) -> &'static str {
        match self {
            EventScope::ProcessInstance => "process-instances",
            EventScope::Task => "tasks",
        }
    }
}

impl std::fmt::Display for EventScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventScope::ProcessInstance => write!(f, "process"),
            EventScope::Task => write!(f, "task"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_process_instance_projection_drops_unknown_fields() {
        let instance: ProcessInstance = serde_json::from_value(json!({
            "id": "42",
            "name": "Order_Processing_42",
            "status": "ACTIVE",
            "startTime": "2024-01-01T00:00:00Z",
            "businessKey": "ORD-1234-abcd",
            "tenantId": "acme",
            "definitionId": "order:3:99",
        }))
        .unwrap();

        assert_eq!(instance.business_key.as_deref(), Some("ORD-1234-abcd"));
        let back = serde_json::to_value(&instance).unwrap();
        assert!(back.get("tenantId").is_none());
        assert_eq!(back["startTime"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_variable_type_field() {
        let var: Variable =
            serde_json::from_value(json!({"name": "amount", "value": 250, "type": "Integer"}))
                .unwrap();
        assert_eq!(var.value, json!(250));
        assert_eq!(var.value_type.as_deref(), Some("Integer"));
    }

    #[test]
    fn test_event_matches_type_or_details() {
        let event = Event {
            id: "e1".to_string(),
            event_type: "SERVICE_TASK_FAIL".to_string(),
            timestamp: None,
            details: "Timeout exception".to_string(),
        };
        assert!(event.matches("fail"));
        assert!(event.matches("TIMEOUT"));
        assert!(!event.matches("variable"));
    }

    #[test]
    fn test_event_scope_paths() {
        assert_eq!(EventScope::ProcessInstance.as_path(), "process-instances");
        assert_eq!(EventScope::Task.as_path(), "tasks");
        assert_eq!(EventScope::Task.to_string(), "task");
    }
}
