//! Declarative device descriptors.
//!
//! A [`DeviceDescriptor`] is the static record an add-on hands to the
//! gateway when a device appears: identity, display name, capability
//! tags, and the actions and events the device supports. Action inputs
//! are described with JSON-schema objects, which the gateway uses for
//! validation and for rendering action forms.

use serde::{Deserialize, Serialize};

use crate::error::AddonError;

/// One host-invocable action a device declares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Action name, unique within the device (e.g. `"send"`).
    pub name: String,

    /// Human-readable label shown in the gateway UI.
    pub label: String,

    /// Human-readable description of what the action does.
    pub description: String,

    /// JSON schema for the action's input payload. An empty object means
    /// the action takes no input.
    #[serde(default)]
    pub input: serde_json::Value,
}

/// One event a device may emit. Declared for completeness; devices with
/// no events carry an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefinition {
    /// Event name, unique within the device.
    pub name: String,

    /// JSON schema for the event payload.
    #[serde(default)]
    pub schema: serde_json::Value,
}

/// Immutable declarative record of one virtual device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Globally unique device identifier (e.g. `"email-sender-0"`).
    pub id: String,

    /// Display name shown in the gateway UI.
    pub name: String,

    /// Capability tags (`@type` annotations). May be empty.
    #[serde(default)]
    pub device_types: Vec<String>,

    /// Actions the device supports, in declaration order.
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,

    /// Events the device emits, in declaration order.
    #[serde(default)]
    pub events: Vec<EventDefinition>,
}

impl DeviceDescriptor {
    /// Validate the descriptor. Returns the first problem found, or
    /// `Ok(())` for a well-formed record.
    pub fn validate(&self) -> Result<(), AddonError> {
        if self.id.is_empty() {
            return Err(AddonError::InvalidDescriptor("id is required".into()));
        }
        if self.name.is_empty() {
            return Err(AddonError::InvalidDescriptor("name is required".into()));
        }
        for (i, action) in self.actions.iter().enumerate() {
            if action.name.is_empty() {
                return Err(AddonError::InvalidDescriptor(format!(
                    "action #{i} has an empty name"
                )));
            }
            if self.actions[..i].iter().any(|a| a.name == action.name) {
                return Err(AddonError::InvalidDescriptor(format!(
                    "duplicate action name '{}'",
                    action.name
                )));
            }
        }
        Ok(())
    }

    /// Look up an action definition by name.
    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> DeviceDescriptor {
        DeviceDescriptor {
            id: "lamp-0".into(),
            name: "Lamp".into(),
            device_types: vec!["OnOffSwitch".into()],
            actions: vec![
                ActionDefinition {
                    name: "toggle".into(),
                    label: "Toggle".into(),
                    description: "Flip the lamp state".into(),
                    input: serde_json::json!({}),
                },
                ActionDefinition {
                    name: "fade".into(),
                    label: "Fade".into(),
                    description: "Fade to a level".into(),
                    input: serde_json::json!({
                        "type": "object",
                        "required": ["level"],
                        "properties": { "level": { "type": "integer" } }
                    }),
                },
            ],
            events: vec![],
        }
    }

    #[test]
    fn valid_descriptor_passes() {
        descriptor().validate().unwrap();
    }

    #[test]
    fn empty_id_fails() {
        let mut d = descriptor();
        d.id.clear();
        let msg = d.validate().unwrap_err().to_string();
        assert!(msg.contains("id is required"), "got: {msg}");
    }

    #[test]
    fn empty_name_fails() {
        let mut d = descriptor();
        d.name.clear();
        let msg = d.validate().unwrap_err().to_string();
        assert!(msg.contains("name is required"), "got: {msg}");
    }

    #[test]
    fn duplicate_action_name_fails() {
        let mut d = descriptor();
        d.actions.push(d.actions[0].clone());
        let msg = d.validate().unwrap_err().to_string();
        assert!(msg.contains("duplicate action name 'toggle'"), "got: {msg}");
    }

    #[test]
    fn action_lookup() {
        let d = descriptor();
        assert_eq!(d.action("fade").unwrap().label, "Fade");
        assert!(d.action("reboot").is_none());
    }

    #[test]
    fn serde_roundtrip_preserves_action_order() {
        let d = descriptor();
        let json = serde_json::to_string(&d).unwrap();
        let restored: DeviceDescriptor = serde_json::from_str(&json).unwrap();
        let names: Vec<_> = restored.actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["toggle", "fade"]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let d: DeviceDescriptor =
            serde_json::from_str(r#"{"id": "x-0", "name": "X"}"#).unwrap();
        assert!(d.device_types.is_empty());
        assert!(d.actions.is_empty());
        assert!(d.events.is_empty());
        d.validate().unwrap();
    }
}
