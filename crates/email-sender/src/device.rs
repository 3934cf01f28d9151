//! The Email Sender device controller.
//!
//! Receives action invocations from the gateway, parses them into a
//! typed [`SendAction`], and drives exactly one [`Mailer::send`] per
//! invocation. The invocation reaches `Finished` only after the mailer
//! resolves; any error marks it `Failed` and is returned so the host
//! observes the failure.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use gateway_addon::action::ActionInvocation;
use gateway_addon::descriptor::DeviceDescriptor;
use gateway_addon::error::AddonError;
use gateway_addon::traits::Device;

use crate::config::ConfigHandle;
use crate::descriptor::{
    ACTION_SEND, ACTION_SEND_NOTIFICATION, ACTION_SEND_SIMPLE, NOTIFICATION_SUBJECT,
    email_sender_descriptor,
};
use crate::mailer::{Mailer, SendReceipt};

/// What to do with an invocation whose action name the device does not
/// declare.
///
/// `Reject` (the default) fails the invocation. `Ignore` finishes it
/// without sending anything, for hosts that treat unmatched action
/// names as a no-op rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownActionPolicy {
    /// Fail the invocation with [`AddonError::UnknownAction`].
    #[default]
    Reject,
    /// Finish the invocation without sending; a silent no-op.
    Ignore,
}

/// A typed action request, parsed from an invocation's name and input.
///
/// Missing optional strings default to `""`; a missing required input is
/// an [`AddonError::InvalidInput`]; an unrecognized name is an
/// [`AddonError::UnknownAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendAction {
    /// Send to an explicit recipient.
    Send {
        to: String,
        subject: String,
        body: String,
    },
    /// Send to the configured account with only a subject.
    SendSimple { subject: String },
    /// Send the fixed notification to the configured account.
    SendNotification,
}

impl SendAction {
    /// Parse an invocation's `(name, input)` pair.
    pub fn parse(name: &str, input: &serde_json::Value) -> Result<Self, AddonError> {
        let str_field = |key: &str| input.get(key).and_then(serde_json::Value::as_str);
        match name {
            ACTION_SEND => {
                let to = str_field("to").ok_or_else(|| {
                    AddonError::InvalidInput("send: 'to' is required".into())
                })?;
                Ok(Self::Send {
                    to: to.to_owned(),
                    subject: str_field("subject").unwrap_or("").to_owned(),
                    body: str_field("body").unwrap_or("").to_owned(),
                })
            }
            ACTION_SEND_SIMPLE => Ok(Self::SendSimple {
                subject: str_field("subject").unwrap_or("").to_owned(),
            }),
            ACTION_SEND_NOTIFICATION => Ok(Self::SendNotification),
            other => Err(AddonError::UnknownAction(other.to_owned())),
        }
    }
}

/// The singleton virtual device backing the Email Sender add-on.
pub struct EmailSenderDevice {
    descriptor: DeviceDescriptor,
    action_schemas: HashMap<String, serde_json::Value>,
    config: Arc<ConfigHandle>,
    mailer: Arc<dyn Mailer>,
    unknown_actions: UnknownActionPolicy,
}

impl EmailSenderDevice {
    /// Create the device with the default [`UnknownActionPolicy`].
    pub fn new(
        config: Arc<ConfigHandle>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AddonError> {
        Self::with_policy(config, mailer, UnknownActionPolicy::default())
    }

    /// Create the device with an explicit unknown-action policy.
    pub fn with_policy(
        config: Arc<ConfigHandle>,
        mailer: Arc<dyn Mailer>,
        unknown_actions: UnknownActionPolicy,
    ) -> Result<Self, AddonError> {
        let descriptor = email_sender_descriptor();
        descriptor.validate()?;
        let action_schemas = descriptor
            .actions
            .iter()
            .map(|a| (a.name.clone(), a.input.clone()))
            .collect();
        Ok(Self {
            descriptor,
            action_schemas,
            config,
            mailer,
            unknown_actions,
        })
    }

    /// The declared input schema for an action, if the device has it.
    pub fn action_schema(&self, name: &str) -> Option<&serde_json::Value> {
        self.action_schemas.get(name)
    }

    /// Issue the single mailer call for a parsed action, against one
    /// config snapshot captured here.
    async fn dispatch(&self, action: SendAction) -> Result<SendReceipt, AddonError> {
        let config = self.config.snapshot();
        match action {
            SendAction::Send { to, subject, body } => {
                self.mailer.send(&config, &to, &subject, &body).await
            }
            SendAction::SendSimple { subject } => {
                self.mailer.send(&config, &config.email, &subject, "").await
            }
            SendAction::SendNotification => {
                self.mailer
                    .send(&config, &config.email, NOTIFICATION_SUBJECT, "")
                    .await
            }
        }
    }
}

#[async_trait]
impl Device for EmailSenderDevice {
    fn id(&self) -> &str {
        &self.descriptor.id
    }

    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    async fn perform_action(
        &self,
        invocation: &mut ActionInvocation,
    ) -> Result<(), AddonError> {
        info!(
            action = %invocation.name,
            input = %invocation.input,
            "performing action"
        );
        invocation.start()?;

        let action = match SendAction::parse(&invocation.name, &invocation.input) {
            Ok(action) => action,
            Err(AddonError::UnknownAction(name))
                if self.unknown_actions == UnknownActionPolicy::Ignore =>
            {
                warn!(action = %name, "unknown action ignored");
                invocation.finish()?;
                return Ok(());
            }
            Err(err) => {
                invocation.fail(err.to_string())?;
                return Err(err);
            }
        };

        match self.dispatch(action).await {
            Ok(receipt) => {
                debug!(code = %receipt.code, "mail accepted");
                invocation.finish()?;
                Ok(())
            }
            Err(err) => {
                invocation.fail(err.to_string())?;
                Err(err)
            }
        }
    }
}
