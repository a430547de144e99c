//! One-shot position acquisition.
//!
//! [`LocationProvider::acquire`] is the single-fire entry point used at app
//! start: it yields at most one coordinate and never retries. Failures are
//! logged and swallowed so the caller only has to handle "got a position" or
//! "did not".

use std::sync::{Arc, Mutex, PoisonError};

use shiftmap_core::Coordinate;
use tokio::time::Instant;

use crate::error::LocationError;
use crate::source::{PermissionGate, PositionSource};
use crate::types::{LocationCapability, PermissionRationale, PermissionStatus, PositionOptions};

pub struct LocationProvider {
    source: Arc<dyn PositionSource>,
    permission: Option<Arc<dyn PermissionGate>>,
    rationale: PermissionRationale,
    options: PositionOptions,
    last_fix: Mutex<Option<(Coordinate, Instant)>>,
}

impl LocationProvider {
    /// Creates a provider for a platform that needs no explicit consent.
    #[must_use]
    pub fn new(source: Arc<dyn PositionSource>, options: PositionOptions) -> Self {
        Self {
            source,
            permission: None,
            rationale: PermissionRationale::default(),
            options,
            last_fix: Mutex::new(None),
        }
    }

    /// Requires `gate` to grant [`LocationCapability::FineLocation`] before
    /// every acquisition.
    #[must_use]
    pub fn with_permission_gate(mut self, gate: Arc<dyn PermissionGate>) -> Self {
        self.permission = Some(gate);
        self
    }

    #[must_use]
    pub fn with_rationale(mut self, rationale: PermissionRationale) -> Self {
        self.rationale = rationale;
        self
    }

    #[must_use]
    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Acquires one position, logging any failure.
    ///
    /// Returns `None` when permission is denied or no fix could be obtained.
    /// Callers must not expect a retry.
    pub async fn acquire(&self) -> Option<Coordinate> {
        match self.try_acquire().await {
            Ok(coordinate) => {
                tracing::info!(%coordinate, "device position acquired");
                Some(coordinate)
            }
            Err(LocationError::PermissionDenied) => {
                tracing::warn!("location permission not granted");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "location acquisition failed");
                None
            }
        }
    }

    /// Acquires one position, returning the failure to the caller.
    ///
    /// # Errors
    ///
    /// - [`LocationError::PermissionDenied`] if the gate answers `Denied`.
    /// - [`LocationError::PermissionRequest`] if the gate itself fails.
    /// - [`LocationError::Timeout`] if the source does not answer within
    ///   `options.timeout`.
    /// - [`LocationError::PositionUnavailable`] as reported by the source.
    pub async fn try_acquire(&self) -> Result<Coordinate, LocationError> {
        if let Some(gate) = &self.permission {
            let status = gate
                .request(LocationCapability::FineLocation, &self.rationale)
                .await?;
            if status == PermissionStatus::Denied {
                return Err(LocationError::PermissionDenied);
            }
        }

        if let Some(cached) = self.cached_fix() {
            tracing::debug!(coordinate = %cached, "reusing cached position");
            return Ok(cached);
        }

        let timeout = self.options.timeout;
        let coordinate =
            match tokio::time::timeout(timeout, self.source.current_position(&self.options)).await
            {
                Ok(result) => result?,
                Err(_) => {
                    return Err(LocationError::Timeout {
                        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    })
                }
            };

        *self.last_fix.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((coordinate, Instant::now()));
        Ok(coordinate)
    }

    fn cached_fix(&self) -> Option<Coordinate> {
        let last_fix = *self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        last_fix
            .filter(|(_, taken_at)| taken_at.elapsed() <= self.options.max_cached_age)
            .map(|(coordinate, _)| coordinate)
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
