use crate::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What the shift store does with a selection whose id is missing from a
/// freshly loaded list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleSelection {
    /// Leave the selection in place.
    #[default]
    Keep,
    /// Drop the selection.
    Clear,
}

impl std::fmt::Display for StaleSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaleSelection::Keep => write!(f, "keep"),
            StaleSelection::Clear => write!(f, "clear"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub shifts_base_url: String,
    pub geocode_base_url: String,
    pub geocode_language: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub location_timeout_ms: u64,
    pub location_max_age_ms: u64,
    pub location_high_accuracy: bool,
    pub stale_selection: StaleSelection,
    /// Fixed device position for hosts without a location service.
    pub device_position: Option<Coordinate>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("shifts_base_url", &self.shifts_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("geocode_language", &self.geocode_language)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("location_timeout_ms", &self.location_timeout_ms)
            .field("location_max_age_ms", &self.location_max_age_ms)
            .field("location_high_accuracy", &self.location_high_accuracy)
            .field("stale_selection", &self.stale_selection)
            .field(
                "device_position",
                &self.device_position.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
