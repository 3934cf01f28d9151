//! Email sender add-on for the Things Gateway.
//!
//! Exposes a single virtual "Email Sender" device whose three actions
//! trigger outgoing mail over authenticated SMTP:
//!
//! | Action | Effect |
//! |--------|--------|
//! | `send` | Send to an explicit recipient with subject and body |
//! | `sendSimple` | Send to the configured account with only a subject |
//! | `sendNotification` | Send a fixed notification to the configured account |
//!
//! The add-on is glue: it loads stored credentials through the host's
//! [`ConfigStore`](gateway_addon::ConfigStore), builds a fresh SMTP
//! transport per send with `lettre`, and reports the result through the
//! invocation's lifecycle state. There is no queuing, retry, or
//! multi-recipient support.
//!
//! Configuration lives behind a [`ConfigHandle`]: each send captures one
//! immutable snapshot, and a reload swaps in a whole new snapshot without
//! disturbing sends already in flight.

pub mod adapter;
pub mod config;
pub mod descriptor;
pub mod device;
pub mod mailer;

pub use adapter::EmailSenderAdapter;
pub use config::{ConfigHandle, ConfigOverlay, SenderConfig};
pub use descriptor::email_sender_descriptor;
pub use device::{EmailSenderDevice, SendAction, UnknownActionPolicy};
pub use mailer::{Mailer, SendReceipt, SmtpMailer};
