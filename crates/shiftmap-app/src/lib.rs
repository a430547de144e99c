//! Wires location, city resolution and the shift list into one flow.

pub mod coordinator;
pub mod error;

pub use coordinator::{Coordinator, Screen, UiState};
pub use error::AppError;
