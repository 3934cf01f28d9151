//! Outgoing mail dispatch.
//!
//! [`Mailer`] is the seam between the device controller and the SMTP
//! stack, so controller tests can record sends without a network.
//! [`SmtpMailer`] is the real implementation on top of `lettre`: one
//! fresh implicit-TLS transport per call, authenticated with the
//! configured account, no pooling and no retry.

use async_trait::async_trait;
use lettre::message::{Mailbox, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use gateway_addon::error::AddonError;

use crate::config::SenderConfig;

/// Transport acknowledgement for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Whether the server replied with a positive completion code.
    pub positive: bool,
    /// The SMTP reply code (e.g. `"250"`).
    pub code: String,
}

/// Sends one plain-text message per call.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `body` to `to` with the given subject, using the endpoint and
    /// credentials in `config`. Exactly one transport send is attempted;
    /// transport failures surface as [`AddonError::Transport`].
    async fn send(
        &self,
        config: &SenderConfig,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, AddonError>;
}

/// [`Mailer`] backed by `lettre`'s async SMTP transport.
#[derive(Debug, Clone, Default)]
pub struct SmtpMailer;

impl SmtpMailer {
    fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox, AddonError> {
        address.parse().map_err(|err| {
            AddonError::InvalidInput(format!("invalid {role} address '{address}': {err}"))
        })
    }

    fn message(
        config: &SenderConfig,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, AddonError> {
        Message::builder()
            .from(Self::parse_mailbox(&config.email, "from")?)
            .to(Self::parse_mailbox(to, "to")?)
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_owned())
            .map_err(AddonError::transport)
    }

    fn transport(
        config: &SenderConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, AddonError> {
        let credentials = Credentials::new(
            config.email.clone(),
            config.password.expose().to_owned(),
        );
        // relay() is implicit TLS; the gateway config defaults to port 465.
        Ok(AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(AddonError::transport)?
            .port(config.port)
            .credentials(credentials)
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        config: &SenderConfig,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, AddonError> {
        let message = Self::message(config, to, subject, body)?;
        let transport = Self::transport(config)?;

        debug!(host = %config.host, port = config.port, to, "submitting mail");
        let response = transport.send(message).await.map_err(AddonError::transport)?;

        Ok(SendReceipt {
            positive: response.is_positive(),
            code: response.code().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SenderConfig {
        SenderConfig {
            email: "me@example.com".into(),
            password: "hunter2".into(),
            ..Default::default()
        }
    }

    #[test]
    fn message_carries_from_to_subject_and_body() {
        let msg = SmtpMailer::message(&config(), "a@x.com", "Hi", "Hello").unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("From: me@example.com"));
        assert!(raw.contains("To: a@x.com"));
        assert!(raw.contains("Subject: Hi"));
        assert!(raw.contains("Hello"));
    }

    #[test]
    fn empty_subject_and_body_are_valid() {
        let msg = SmtpMailer::message(&config(), "a@x.com", "", "").unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("Subject:"));
    }

    #[test]
    fn unconfigured_from_address_is_invalid_input() {
        let err = SmtpMailer::message(&SenderConfig::default(), "a@x.com", "Hi", "")
            .unwrap_err();
        assert!(matches!(err, AddonError::InvalidInput(_)));
        assert!(err.to_string().contains("from"));
    }

    #[test]
    fn malformed_recipient_is_invalid_input() {
        let err = SmtpMailer::message(&config(), "not-an-address", "Hi", "").unwrap_err();
        assert!(matches!(err, AddonError::InvalidInput(_)));
        assert!(err.to_string().contains("to"));
    }

    #[test]
    fn transport_builds_from_config() {
        // Construction only; no connection is opened until a send.
        SmtpMailer::transport(&config()).unwrap();
    }
}
