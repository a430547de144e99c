//! Reverse geocoding for shiftmap: coordinate → display city.

pub mod client;
pub mod error;
pub mod resolver;
pub mod types;

pub use client::{city_from_address, GeocodeClient, ReverseGeocoder, UNKNOWN_CITY};
pub use error::GeocodeError;
pub use resolver::{CityDisplayState, CityResolver, CITY_LOOKUP_FAILED};
pub use types::{Address, ReverseResponse};
