use shiftmap_geocode::GeocodeError;
use shiftmap_shifts::ShiftsError;
use thiserror::Error;

/// Failures while wiring the coordinator from configuration.
///
/// Once running, the coordinator reports failures through state, never
/// through this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("geocode client: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("shifts client: {0}")]
    Shifts(#[from] ShiftsError),
}
