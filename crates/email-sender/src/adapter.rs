//! The Email Sender adapter.
//!
//! Construction registers the adapter with the gateway and ensures the
//! singleton device exists; `start_pairing` re-runs the same ensure step.
//! Each ensure step begins with a best-effort configuration refresh: a
//! failed load is logged and the previous snapshot kept.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{info, warn};

use gateway_addon::error::AddonError;
use gateway_addon::traits::{Adapter, AdapterHost, ConfigStore, Device};

use crate::config::{ConfigHandle, ConfigOverlay, SenderConfig};
use crate::descriptor::{ADAPTER_ID, DEVICE_ID};
use crate::device::{EmailSenderDevice, UnknownActionPolicy};
use crate::mailer::Mailer;

/// Registers one [`EmailSenderDevice`] with the gateway and keeps its
/// configuration fresh.
pub struct EmailSenderAdapter {
    host: Arc<dyn AdapterHost>,
    store: Arc<dyn ConfigStore>,
    mailer: Arc<dyn Mailer>,
    config: Arc<ConfigHandle>,
    package_name: String,
    unknown_actions: UnknownActionPolicy,
    devices: RwLock<HashMap<String, Arc<EmailSenderDevice>>>,
}

impl EmailSenderAdapter {
    /// Construct the adapter: register with the host, then ensure the
    /// device instance exists.
    pub async fn new(
        host: Arc<dyn AdapterHost>,
        store: Arc<dyn ConfigStore>,
        mailer: Arc<dyn Mailer>,
        package_name: impl Into<String>,
    ) -> Result<Self, AddonError> {
        Self::with_policy(host, store, mailer, package_name, UnknownActionPolicy::default())
            .await
    }

    /// Construct the adapter with an explicit unknown-action policy for
    /// its device.
    pub async fn with_policy(
        host: Arc<dyn AdapterHost>,
        store: Arc<dyn ConfigStore>,
        mailer: Arc<dyn Mailer>,
        package_name: impl Into<String>,
        unknown_actions: UnknownActionPolicy,
    ) -> Result<Self, AddonError> {
        let adapter = Self {
            host,
            store,
            mailer,
            config: Arc::new(ConfigHandle::default()),
            package_name: package_name.into(),
            unknown_actions,
            devices: RwLock::new(HashMap::new()),
        };
        adapter
            .host
            .register_adapter(ADAPTER_ID, &adapter.package_name)
            .await?;
        adapter.ensure_device().await?;
        Ok(adapter)
    }

    /// The shared configuration handle.
    pub fn config(&self) -> &Arc<ConfigHandle> {
        &self.config
    }

    /// Look up a managed device by id.
    pub fn device(&self, id: &str) -> Option<Arc<EmailSenderDevice>> {
        self.devices
            .read()
            .expect("device table poisoned")
            .get(id)
            .cloned()
    }

    /// Reload stored configuration and swap in the merged snapshot.
    ///
    /// Best-effort: on error the previous snapshot stays in place and the
    /// caller decides whether the failure matters.
    pub async fn refresh_config(&self) -> Result<(), AddonError> {
        let stored = self.store.load_config().await?;
        let overlay: ConfigOverlay = serde_json::from_value(stored)
            .map_err(|err| AddonError::ConfigLoad(format!("stored config malformed: {err}")))?;
        let next = SenderConfig::default().merged(overlay);
        info!(host = %next.host, port = next.port, "configuration reloaded");
        self.config.replace(next);
        Ok(())
    }

    /// Refresh configuration and create/announce the singleton device if
    /// it does not exist yet. Idempotent by device id.
    async fn ensure_device(&self) -> Result<(), AddonError> {
        if let Err(err) = self.refresh_config().await {
            warn!(error = %err, "config refresh failed, keeping previous configuration");
        }

        let exists = self
            .devices
            .read()
            .expect("device table poisoned")
            .contains_key(DEVICE_ID);
        if exists {
            return Ok(());
        }

        let device = Arc::new(EmailSenderDevice::with_policy(
            self.config.clone(),
            self.mailer.clone(),
            self.unknown_actions,
        )?);
        self.host.handle_device_added(device.descriptor()).await?;
        self.devices
            .write()
            .expect("device table poisoned")
            .insert(DEVICE_ID.to_owned(), device);
        info!(device = DEVICE_ID, "device added");
        Ok(())
    }
}

#[async_trait]
impl Adapter for EmailSenderAdapter {
    fn id(&self) -> &str {
        ADAPTER_ID
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    async fn start_pairing(&self) -> Result<(), AddonError> {
        self.ensure_device().await
    }
}
