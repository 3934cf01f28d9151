//! Add-on trait seams.
//!
//! Two sides of the contract:
//! - the host implements [`AdapterHost`] and [`ConfigStore`];
//! - an add-on implements [`Adapter`] and [`Device`].
//!
//! All traits are `Send + Sync`. Async methods use `#[async_trait]`.

use async_trait::async_trait;

use crate::action::ActionInvocation;
use crate::descriptor::DeviceDescriptor;
use crate::error::AddonError;

// ---------------------------------------------------------------------------
// AdapterHost
// ---------------------------------------------------------------------------

/// Registration callbacks the gateway runtime exposes to add-ons.
#[async_trait]
pub trait AdapterHost: Send + Sync {
    /// Announce a newly constructed adapter to the gateway.
    async fn register_adapter(
        &self,
        adapter_id: &str,
        package_name: &str,
    ) -> Result<(), AddonError>;

    /// Announce a device the adapter now manages. The gateway records the
    /// descriptor's actions and events and starts routing invocations.
    async fn handle_device_added(
        &self,
        descriptor: &DeviceDescriptor,
    ) -> Result<(), AddonError>;
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// Persisted per-add-on configuration, keyed by the add-on's package
/// name. The store holds a flat JSON object of string keys; the add-on
/// decides which keys it recognizes.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Open a scoped connection and read the stored configuration object.
    /// Returns `{}` when nothing has been stored yet.
    async fn load_config(&self) -> Result<serde_json::Value, AddonError>;
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// An installed add-on. One adapter manages one or more devices.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Stable adapter identifier (e.g. `"email-sender"`).
    fn id(&self) -> &str;

    /// Package name the adapter was installed under; also the key into
    /// the [`ConfigStore`].
    fn package_name(&self) -> &str;

    /// Called when the user starts pairing. Adapters backed by fixed
    /// virtual devices re-ensure their devices exist; this must be
    /// idempotent.
    async fn start_pairing(&self) -> Result<(), AddonError>;
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// A virtual device the gateway drives through action invocations.
#[async_trait]
pub trait Device: Send + Sync {
    /// Globally unique device identifier.
    fn id(&self) -> &str;

    /// The declarative record this device was built from.
    fn descriptor(&self) -> &DeviceDescriptor;

    /// Perform one action invocation, driving its lifecycle to a
    /// terminal state. Returns the error that failed the invocation,
    /// if any, so the host observes the failure.
    async fn perform_action(
        &self,
        invocation: &mut ActionInvocation,
    ) -> Result<(), AddonError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn traits_are_send_sync() {
        assert_send_sync::<dyn AdapterHost>();
        assert_send_sync::<dyn ConfigStore>();
        assert_send_sync::<dyn Adapter>();
        assert_send_sync::<dyn Device>();
    }
}
