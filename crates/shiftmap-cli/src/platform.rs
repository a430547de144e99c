//! Terminal stand-ins for the platform location service and consent dialog.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use shiftmap_core::Coordinate;
use shiftmap_location::{
    LocationCapability, LocationError, PermissionGate, PermissionRationale, PermissionStatus,
    PositionOptions, PositionSource,
};

/// Used when neither flags nor config name a position.
pub(crate) struct NoPositionService;

#[async_trait]
impl PositionSource for NoPositionService {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, LocationError> {
        Err(LocationError::PositionUnavailable {
            code: 2,
            message: "no location service; pass --lat/--lon or set SHIFTMAP_LATITUDE and SHIFTMAP_LONGITUDE"
                .to_owned(),
        })
    }
}

/// Asks for consent with a `[y/N]` prompt on stdin.
pub(crate) struct PromptPermissionGate;

#[async_trait]
impl PermissionGate for PromptPermissionGate {
    async fn request(
        &self,
        capability: LocationCapability,
        rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, LocationError> {
        let prompt = format!(
            "{}\n{}\n[y = {}, n = {}] ",
            rationale.title, rationale.message, rationale.button_positive, rationale.button_negative
        );
        tracing::debug!(?capability, "prompting for location consent");

        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await
        .map_err(|e| LocationError::PermissionRequest(e.to_string()))?
        .map_err(|e| LocationError::PermissionRequest(e.to_string()))?;

        Ok(parse_answer(&answer))
    }
}

fn parse_answer(answer: &str) -> PermissionStatus {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "ok" => PermissionStatus::Granted,
        _ => PermissionStatus::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_grants() {
        assert_eq!(parse_answer("y\n"), PermissionStatus::Granted);
        assert_eq!(parse_answer(" YES "), PermissionStatus::Granted);
        assert_eq!(parse_answer("\n"), PermissionStatus::Denied);
        assert_eq!(parse_answer("maybe"), PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn missing_service_reports_unavailable() {
        let err = NoPositionService
            .current_position(&PositionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LocationError::PositionUnavailable { code: 2, .. }));
    }
}
