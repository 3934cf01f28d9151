//! Add-on error types.
//!
//! Defines [`AddonError`], the unified error type for add-on operations:
//! configuration loading, action dispatch, and mail transport.

use thiserror::Error;

/// Errors produced by add-on operations.
#[derive(Debug, Error)]
pub enum AddonError {
    /// Stored configuration could not be loaded or parsed. Recoverable:
    /// callers keep the previous configuration.
    #[error("config load failed: {0}")]
    ConfigLoad(String),

    /// The outgoing mail transport rejected the send. The underlying
    /// transport error is carried through opaquely.
    #[error("mail transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An action invocation was missing a required input or carried a
    /// value of the wrong shape.
    #[error("invalid action input: {0}")]
    InvalidInput(String),

    /// The invocation named an action the device does not declare.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// An invocation lifecycle step was applied out of order.
    #[error("invalid action transition: {0}")]
    InvalidTransition(String),

    /// A device descriptor failed validation.
    #[error("invalid device descriptor: {0}")]
    InvalidDescriptor(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AddonError {
    /// Wrap an arbitrary transport-layer error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_config_load() {
        let err = AddonError::ConfigLoad("store unavailable".into());
        assert_eq!(err.to_string(), "config load failed: store unavailable");
    }

    #[test]
    fn error_display_unknown_action() {
        let err = AddonError::UnknownAction("reboot".into());
        assert_eq!(err.to_string(), "unknown action: reboot");
    }

    #[test]
    fn error_display_invalid_input() {
        let err = AddonError::InvalidInput("'to' is required".into());
        assert_eq!(err.to_string(), "invalid action input: 'to' is required");
    }

    #[test]
    fn error_display_invalid_transition() {
        let err = AddonError::InvalidTransition("finish before start".into());
        assert_eq!(
            err.to_string(),
            "invalid action transition: finish before start"
        );
    }

    #[test]
    fn transport_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AddonError::transport(io_err);
        assert!(matches!(err, AddonError::Transport(_)));
        assert!(err.to_string().contains("refused"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = AddonError::from(json_err);
        assert!(matches!(err, AddonError::Serialization(_)));
    }
}
