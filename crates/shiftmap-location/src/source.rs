//! Seams to the platform: where positions and permission answers come from.

use async_trait::async_trait;
use shiftmap_core::Coordinate;

use crate::error::LocationError;
use crate::types::{LocationCapability, PermissionRationale, PermissionStatus, PositionOptions};

/// Produces a single device position on request.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Coordinate, LocationError>;
}

/// Asks the user (or the platform) for a location capability.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn request(
        &self,
        capability: LocationCapability,
        rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, LocationError>;
}

/// A position source that always reports the same coordinate.
pub struct FixedPositionSource {
    coordinate: Coordinate,
}

impl FixedPositionSource {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}

/// For platforms where location needs no explicit consent.
pub struct NoConsentRequired;

#[async_trait]
impl PermissionGate for NoConsentRequired {
    async fn request(
        &self,
        _capability: LocationCapability,
        _rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, LocationError> {
        Ok(PermissionStatus::Granted)
    }
}

/// A gate with a predetermined answer.
pub struct PresetPermission(pub PermissionStatus);

#[async_trait]
impl PermissionGate for PresetPermission {
    async fn request(
        &self,
        _capability: LocationCapability,
        _rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, LocationError> {
        Ok(self.0)
    }
}
