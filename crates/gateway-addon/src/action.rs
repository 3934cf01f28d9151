//! Action invocation lifecycle.
//!
//! The gateway issues one [`ActionInvocation`] per action request. The
//! device drives it through `Pending -> Started -> Finished` on success
//! or `Pending -> Started -> Failed` on error. Terminal states are
//! sticky; out-of-order transitions are rejected rather than silently
//! absorbed.

use serde::{Deserialize, Serialize};

use crate::error::AddonError;

/// Lifecycle state of an action invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Created by the host, not yet picked up by the device.
    Pending,
    /// The device has begun performing the action.
    Started,
    /// The action completed successfully. Terminal.
    Finished,
    /// The action failed; see [`ActionInvocation::error`]. Terminal.
    Failed,
}

/// One host-issued action call, consumed and discarded by the device.
#[derive(Debug, Clone)]
pub struct ActionInvocation {
    /// Host-assigned invocation id.
    pub id: String,

    /// Name of the invoked action.
    pub name: String,

    /// Input payload, a JSON object per the action's declared schema.
    pub input: serde_json::Value,

    status: ActionStatus,
    error: Option<String>,
}

impl ActionInvocation {
    /// Create a new invocation in the `Pending` state.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        input: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
            status: ActionStatus::Pending,
            error: None,
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ActionStatus {
        self.status
    }

    /// Failure reason, present only in the `Failed` state.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transition `Pending -> Started`.
    pub fn start(&mut self) -> Result<(), AddonError> {
        match self.status {
            ActionStatus::Pending => {
                self.status = ActionStatus::Started;
                Ok(())
            }
            other => Err(AddonError::InvalidTransition(format!(
                "cannot start action '{}' from {other:?}",
                self.name
            ))),
        }
    }

    /// Transition `Started -> Finished`.
    pub fn finish(&mut self) -> Result<(), AddonError> {
        match self.status {
            ActionStatus::Started => {
                self.status = ActionStatus::Finished;
                Ok(())
            }
            other => Err(AddonError::InvalidTransition(format!(
                "cannot finish action '{}' from {other:?}",
                self.name
            ))),
        }
    }

    /// Transition `Started -> Failed`, recording the reason.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), AddonError> {
        match self.status {
            ActionStatus::Started => {
                self.status = ActionStatus::Failed;
                self.error = Some(reason.into());
                Ok(())
            }
            other => Err(AddonError::InvalidTransition(format!(
                "cannot fail action '{}' from {other:?}",
                self.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> ActionInvocation {
        ActionInvocation::new("inv-1", "send", serde_json::json!({}))
    }

    #[test]
    fn new_invocation_is_pending() {
        let inv = invocation();
        assert_eq!(inv.status(), ActionStatus::Pending);
        assert!(inv.error().is_none());
    }

    #[test]
    fn success_path() {
        let mut inv = invocation();
        inv.start().unwrap();
        assert_eq!(inv.status(), ActionStatus::Started);
        inv.finish().unwrap();
        assert_eq!(inv.status(), ActionStatus::Finished);
    }

    #[test]
    fn failure_path_records_reason() {
        let mut inv = invocation();
        inv.start().unwrap();
        inv.fail("transport refused").unwrap();
        assert_eq!(inv.status(), ActionStatus::Failed);
        assert_eq!(inv.error(), Some("transport refused"));
    }

    #[test]
    fn finish_before_start_rejected() {
        let mut inv = invocation();
        let err = inv.finish().unwrap_err();
        assert!(matches!(err, AddonError::InvalidTransition(_)));
        assert_eq!(inv.status(), ActionStatus::Pending);
    }

    #[test]
    fn double_start_rejected() {
        let mut inv = invocation();
        inv.start().unwrap();
        assert!(inv.start().is_err());
        assert_eq!(inv.status(), ActionStatus::Started);
    }

    #[test]
    fn terminal_states_are_sticky() {
        let mut inv = invocation();
        inv.start().unwrap();
        inv.finish().unwrap();
        assert!(inv.start().is_err());
        assert!(inv.fail("late").is_err());
        assert_eq!(inv.status(), ActionStatus::Finished);

        let mut inv = invocation();
        inv.start().unwrap();
        inv.fail("boom").unwrap();
        assert!(inv.finish().is_err());
        assert_eq!(inv.status(), ActionStatus::Failed);
    }

    #[test]
    fn status_serde_values() {
        assert_eq!(
            serde_json::to_string(&ActionStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&ActionStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
