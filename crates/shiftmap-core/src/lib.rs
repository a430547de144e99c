//! Shared domain types and configuration for the shiftmap workspace.

pub mod app_config;
pub mod config;
pub mod coordinate;
pub mod shift;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, StaleSelection};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::Coordinate;
pub use shift::{Shift, WorkType};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
