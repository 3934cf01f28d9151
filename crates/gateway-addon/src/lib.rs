//! Add-on trait definitions for the Things Gateway.
//!
//! This crate is the seam between an add-on and the gateway's add-on
//! runtime. It defines the capabilities the host supplies to an add-on
//! and the surface an add-on exposes back:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Adapter`] | An installed add-on: identity plus pairing entry point |
//! | [`Device`] | A virtual device driven by the gateway through actions |
//! | [`AdapterHost`] | Host callbacks for adapter and device registration |
//! | [`ConfigStore`] | Persisted per-add-on configuration, keyed by package name |
//! | [`DeviceDescriptor`] | Declarative device record: actions, events, capability tags |
//! | [`ActionInvocation`] | One host-issued action call with its lifecycle state |
//! | [`AddonError`] | Unified error type for add-on operations |
//!
//! The gateway runtime itself is not part of this crate; hosts implement
//! [`AdapterHost`] and [`ConfigStore`], add-ons implement [`Adapter`] and
//! [`Device`]. All traits are `Send + Sync`; async methods use
//! `#[async_trait]`.

pub mod action;
pub mod descriptor;
pub mod error;
pub mod secret;
pub mod traits;

pub use action::{ActionInvocation, ActionStatus};
pub use descriptor::{ActionDefinition, DeviceDescriptor, EventDefinition};
pub use error::AddonError;
pub use secret::SecretString;
pub use traits::{Adapter, AdapterHost, ConfigStore, Device};
