use std::time::Duration;

use shiftmap_core::AppConfig;

/// Options for a one-shot position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Upper bound on how long to wait for a fix.
    pub timeout: Duration,
    /// A previously obtained fix no older than this is reused.
    pub max_cached_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(30_000),
            max_cached_age: Duration::from_millis(10_000),
        }
    }
}

impl PositionOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            high_accuracy: config.location_high_accuracy,
            timeout: Duration::from_millis(config.location_timeout_ms),
            max_cached_age: Duration::from_millis(config.location_max_age_ms),
        }
    }
}

/// The capability a permission request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationCapability {
    FineLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// User-facing text shown alongside a permission prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRationale {
    pub title: String,
    pub message: String,
    pub button_neutral: String,
    pub button_negative: String,
    pub button_positive: String,
}

impl Default for PermissionRationale {
    fn default() -> Self {
        Self {
            title: "Location permission".to_owned(),
            message: "The app needs access to your precise location.".to_owned(),
            button_neutral: "Ask later".to_owned(),
            button_negative: "Cancel".to_owned(),
            button_positive: "OK".to_owned(),
        }
    }
}
