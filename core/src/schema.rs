//! Declared attribute schemas for the provider and its resources.
//!
//! The orchestrator uses these to decide which attributes a user must set,
//! which are optional, and which only ever come back from the service.

use serde::Serialize;

/// How the orchestrator treats an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be set in configuration.
    Required,
    /// May be set in configuration.
    Optional,
    /// Set only from the service's answer.
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub description: &'static str,
    pub mode: AttributeMode,
    /// Keep the prior state value during planning instead of showing it as
    /// unknown. Only meaningful for computed attributes.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub use_state_for_unknown: bool,
}

impl Attribute {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            mode: AttributeMode::Required,
            use_state_for_unknown: false,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            mode: AttributeMode::Optional,
            use_state_for_unknown: false,
        }
    }

    pub const fn computed(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            mode: AttributeMode::Computed,
            use_state_for_unknown: false,
        }
    }

    pub const fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.mode == AttributeMode::Required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_modes_in_snake_case() {
        let schema = Schema {
            description: "test",
            attributes: vec![
                Attribute::computed("id", "identifier").use_state_for_unknown(),
                Attribute::optional("note", "a note"),
            ],
        };
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["attributes"][0]["mode"], "computed");
        assert_eq!(json["attributes"][0]["use_state_for_unknown"], true);
        assert_eq!(json["attributes"][1]["mode"], "optional");
        assert!(json["attributes"][1].get("use_state_for_unknown").is_none());
    }
}
