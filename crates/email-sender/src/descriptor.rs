//! The static Email Sender device descriptor.
//!
//! One virtual device, three actions, no properties and no events. The
//! input schemas mirror what the gateway UI renders: `send` requires a
//! recipient, `sendSimple` takes an optional subject, `sendNotification`
//! takes nothing.

use serde_json::json;

use gateway_addon::descriptor::{ActionDefinition, DeviceDescriptor};

/// Adapter identifier.
pub const ADAPTER_ID: &str = "email-sender";

/// Identifier of the singleton device instance.
pub const DEVICE_ID: &str = "email-sender-0";

/// Send to an explicit recipient.
pub const ACTION_SEND: &str = "send";

/// Send to the configured account with only a subject.
pub const ACTION_SEND_SIMPLE: &str = "sendSimple";

/// Send a fixed notification to the configured account.
pub const ACTION_SEND_NOTIFICATION: &str = "sendNotification";

/// Subject line used by `sendNotification`.
pub const NOTIFICATION_SUBJECT: &str = "Notification from Things Gateway";

/// Build the Email Sender device record. Constructed once at device
/// creation and never mutated.
pub fn email_sender_descriptor() -> DeviceDescriptor {
    DeviceDescriptor {
        id: DEVICE_ID.into(),
        name: "Email Sender".into(),
        device_types: vec![],
        actions: vec![
            ActionDefinition {
                name: ACTION_SEND_NOTIFICATION.into(),
                label: "Send Notification".into(),
                description: "Send a notification to yourself".into(),
                input: json!({}),
            },
            ActionDefinition {
                name: ACTION_SEND_SIMPLE.into(),
                label: "Send Simple Email".into(),
                description: "Send email to yourself with only a subject".into(),
                input: json!({
                    "type": "object",
                    "properties": {
                        "subject": { "type": "string" }
                    }
                }),
            },
            ActionDefinition {
                name: ACTION_SEND.into(),
                label: "Send Email".into(),
                description: "Send email specifying all details".into(),
                input: json!({
                    "type": "object",
                    "required": ["to"],
                    "properties": {
                        "to": { "type": "string" },
                        "subject": { "type": "string" },
                        "body": { "type": "string" }
                    }
                }),
            },
        ],
        events: vec![],
    }
}
