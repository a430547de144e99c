use thiserror::Error;

/// Errors produced while acquiring a device position.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user refused the location permission.
    #[error("location permission denied")]
    PermissionDenied,

    /// The permission request itself failed (no answer was obtained).
    #[error("location permission request failed: {0}")]
    PermissionRequest(String),

    /// The platform could not produce a fix. `code` is platform-specific.
    #[error("position unavailable (code {code}): {message}")]
    PositionUnavailable { code: i32, message: String },

    /// No fix arrived within the configured timeout.
    #[error("position request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}
