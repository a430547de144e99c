//! Shift listing for shiftmap: the HTTP client and the observable list store.

pub mod client;
pub mod error;
pub mod store;

pub use client::{ShiftSource, ShiftsClient};
pub use error::ShiftsError;
pub use store::{FetchOutcome, ListPhase, ShiftListState, ShiftStore};
