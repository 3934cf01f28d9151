//! Sender configuration: defaults, stored-key overlay, and the snapshot
//! handle.
//!
//! The gateway's config store holds a flat object with the keys `host`,
//! `port`, `email`, and `password`. Whatever keys are present overlay the
//! built-in defaults; the merged result becomes a new immutable snapshot
//! swapped into the [`ConfigHandle`]. A send that already captured a
//! snapshot is unaffected by later swaps.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use gateway_addon::secret::SecretString;

fn default_host() -> String {
    "smtp.gmail.com".into()
}

fn default_port() -> u16 {
    465
}

/// SMTP endpoint and account credentials for one send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    /// SMTP server hostname.
    #[serde(default = "default_host")]
    pub host: String,

    /// SMTP server port (implicit TLS).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Account address, used for authentication and as the `from` (and
    /// default `to`) address.
    #[serde(default)]
    pub email: String,

    /// Account password (never logged or serialized).
    #[serde(default)]
    pub password: SecretString,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            email: String::new(),
            password: SecretString::default(),
        }
    }
}

/// Partial configuration read back from the config store. Absent keys
/// leave the corresponding default in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl SenderConfig {
    /// Produce a new config with the overlay's stored keys applied over
    /// `self`.
    pub fn merged(&self, overlay: ConfigOverlay) -> SenderConfig {
        SenderConfig {
            host: overlay.host.unwrap_or_else(|| self.host.clone()),
            port: overlay.port.unwrap_or(self.port),
            email: overlay.email.unwrap_or_else(|| self.email.clone()),
            password: overlay.password.unwrap_or_else(|| self.password.clone()),
        }
    }
}

/// Shared handle to the current configuration snapshot.
///
/// Reads hand out the current `Arc<SenderConfig>`; a reload replaces the
/// whole snapshot atomically. Holders of an older `Arc` keep seeing the
/// values they captured.
#[derive(Debug, Default)]
pub struct ConfigHandle {
    inner: RwLock<Arc<SenderConfig>>,
}

impl ConfigHandle {
    /// Create a handle seeded with the given configuration.
    pub fn new(config: SenderConfig) -> Self {
        Self {
            inner: RwLock::new(Arc::new(config)),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<SenderConfig> {
        self.inner.read().expect("config lock poisoned").clone()
    }

    /// Swap in a new snapshot.
    pub fn replace(&self, config: SenderConfig) {
        *self.inner.write().expect("config lock poisoned") = Arc::new(config);
    }
}
