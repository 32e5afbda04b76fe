//! Wire DTOs and orchestrator-side models.
//!
//! # Design
//! The service speaks integer ids; the orchestrator stores ids as strings so
//! they round-trip through state files and import. `ApiItem` / `ItemBody`
//! mirror the service schema and are defined independently of the
//! mock-server crate, so integration tests catch schema drift. The `*Plan`
//! and `*State` types are what the orchestrator hands in and persists.

use serde::{Deserialize, Serialize};

/// Fixed identifier of the singleton display record.
pub const DISPLAY_ID: &str = "display";

/// An item as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for item create and update. Both fields are always sent;
/// update is a full replacement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemBody {
    pub name: String,
    pub description: String,
}

/// Desired configuration of an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&ItemPlan> for ItemBody {
    fn from(plan: &ItemPlan) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone().unwrap_or_default(),
        }
    }
}

/// Persisted view of an item. Every field comes from the service's last
/// answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemState {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<ApiItem> for ItemState {
    fn from(item: ApiItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            description: item.description,
        }
    }
}

/// Desired content of the display panel: a JSON document as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayPlan {
    pub data: String,
}

impl DisplayPlan {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Persisted view of the display panel. `id` is always [`DISPLAY_ID`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayState {
    pub id: String,
    pub data: String,
}

impl DisplayState {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            id: DISPLAY_ID.to_string(),
            data: data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_item_defaults_missing_description() {
        let item: ApiItem = serde_json::from_str(r#"{"id":7,"name":"db"}"#).unwrap();
        assert_eq!(item.description, "");
    }

    #[test]
    fn api_item_rejects_string_id() {
        let result: Result<ApiItem, _> =
            serde_json::from_str(r#"{"id":"7","name":"db","description":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn item_body_sends_empty_description_for_unset_plan() {
        let body = ItemBody::from(&ItemPlan::new("cache"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["name"], "cache");
        assert_eq!(json["description"], "");
    }

    #[test]
    fn item_state_renders_numeric_id_as_string() {
        let state = ItemState::from(ApiItem {
            id: 42,
            name: "Web Server".to_string(),
            description: "nginx frontend".to_string(),
        });
        assert_eq!(state.id, "42");
        assert_eq!(state.name, "Web Server");
    }

    #[test]
    fn display_state_uses_fixed_id() {
        assert_eq!(DisplayState::new("{}").id, "display");
    }
}
