//! Device position acquisition for shiftmap.
//!
//! Wraps a platform [`PositionSource`] and an optional [`PermissionGate`] in a
//! single-shot [`LocationProvider`].

pub mod error;
pub mod provider;
pub mod source;
pub mod types;

pub use error::LocationError;
pub use provider::LocationProvider;
pub use source::{
    FixedPositionSource, NoConsentRequired, PermissionGate, PositionSource, PresetPermission,
};
pub use types::{LocationCapability, PermissionRationale, PermissionStatus, PositionOptions};
