use crate::app_config::{AppConfig, Environment, StaleSelection};
use crate::{ConfigError, Coordinate};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// All variables have defaults except the optional fixed device position, so
/// this only fails on malformed values.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| raw.parse::<f64>().map_err(|e| invalid(var, e.to_string())))
            .transpose()
    };

    let env = parse_environment(&or_default("SHIFTMAP_ENV", "development"));
    let log_level = or_default("SHIFTMAP_LOG_LEVEL", "info");

    let shifts_base_url = or_default(
        "SHIFTMAP_SHIFTS_BASE_URL",
        "https://mobile.handswork.pro/api",
    );
    let geocode_base_url = or_default(
        "SHIFTMAP_GEOCODE_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let geocode_language = or_default("SHIFTMAP_GEOCODE_LANGUAGE", "ru");
    let user_agent = or_default("SHIFTMAP_USER_AGENT", "shiftmap/0.1 (shift-finder)");
    let request_timeout_secs = parse_u64("SHIFTMAP_REQUEST_TIMEOUT_SECS", "15")?;

    let location_timeout_ms = parse_u64("SHIFTMAP_LOCATION_TIMEOUT_MS", "30000")?;
    let location_max_age_ms = parse_u64("SHIFTMAP_LOCATION_MAX_AGE_MS", "10000")?;
    let location_high_accuracy = parse_bool("SHIFTMAP_LOCATION_HIGH_ACCURACY", "true")?;

    let stale_selection = match or_default("SHIFTMAP_STALE_SELECTION", "keep").as_str() {
        "keep" => StaleSelection::Keep,
        "clear" => StaleSelection::Clear,
        other => {
            return Err(invalid(
                "SHIFTMAP_STALE_SELECTION",
                format!("expected \"keep\" or \"clear\", got \"{other}\""),
            ))
        }
    };

    let device_position = match (
        parse_f64("SHIFTMAP_LATITUDE")?,
        parse_f64("SHIFTMAP_LONGITUDE")?,
    ) {
        (Some(lat), Some(lon)) => Some(
            Coordinate::new(lat, lon).map_err(|e| invalid("SHIFTMAP_LATITUDE", e.to_string()))?,
        ),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("SHIFTMAP_LONGITUDE".into())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("SHIFTMAP_LATITUDE".into())),
    };

    Ok(AppConfig {
        env,
        log_level,
        shifts_base_url,
        geocode_base_url,
        geocode_language,
        user_agent,
        request_timeout_secs,
        location_timeout_ms,
        location_max_age_ms,
        location_high_accuracy,
        stale_selection,
        device_position,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_uses_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.shifts_base_url, "https://mobile.handswork.pro/api");
        assert_eq!(cfg.geocode_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(cfg.geocode_language, "ru");
        assert_eq!(cfg.user_agent, "shiftmap/0.1 (shift-finder)");
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.location_timeout_ms, 30_000);
        assert_eq!(cfg.location_max_age_ms, 10_000);
        assert!(cfg.location_high_accuracy);
        assert_eq!(cfg.stale_selection, StaleSelection::Keep);
        assert!(cfg.device_position.is_none());
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_SHIFTS_BASE_URL", "http://localhost:9000/api");
        map.insert("SHIFTMAP_GEOCODE_LANGUAGE", "en");
        map.insert("SHIFTMAP_REQUEST_TIMEOUT_SECS", "5");
        map.insert("SHIFTMAP_LOCATION_HIGH_ACCURACY", "false");
        map.insert("SHIFTMAP_STALE_SELECTION", "clear");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();

        assert_eq!(cfg.shifts_base_url, "http://localhost:9000/api");
        assert_eq!(cfg.geocode_language, "en");
        assert_eq!(cfg.request_timeout_secs, 5);
        assert!(!cfg.location_high_accuracy);
        assert_eq!(cfg.stale_selection, StaleSelection::Clear);
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHIFTMAP_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SHIFTMAP_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bool() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_LOCATION_HIGH_ACCURACY", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHIFTMAP_LOCATION_HIGH_ACCURACY"),
            "expected InvalidEnvVar(SHIFTMAP_LOCATION_HIGH_ACCURACY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_unknown_selection_policy() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_STALE_SELECTION", "forget");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHIFTMAP_STALE_SELECTION"),
            "expected InvalidEnvVar(SHIFTMAP_STALE_SELECTION), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_reads_device_position() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_LATITUDE", "55.75");
        map.insert("SHIFTMAP_LONGITUDE", "37.62");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let position = cfg.device_position.expect("position should be set");
        assert!((position.latitude() - 55.75).abs() < f64::EPSILON);
        assert!((position.longitude() - 37.62).abs() < f64::EPSILON);
    }

    #[test]
    fn build_app_config_requires_both_position_components() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_LATITUDE", "55.75");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHIFTMAP_LONGITUDE"),
            "expected MissingEnvVar(SHIFTMAP_LONGITUDE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_out_of_range_position() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_LATITUDE", "123.0");
        map.insert("SHIFTMAP_LONGITUDE", "37.62");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHIFTMAP_LATITUDE"),
            "expected InvalidEnvVar(SHIFTMAP_LATITUDE), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_device_position() {
        let mut map = HashMap::new();
        map.insert("SHIFTMAP_LATITUDE", "55.75");
        map.insert("SHIFTMAP_LONGITUDE", "37.62");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("55.75"), "position leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
