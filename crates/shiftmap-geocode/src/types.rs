//! Nominatim `/reverse?format=json` response types.
//!
//! Only the address components used to name a city are modelled. Nominatim
//! omits components it does not know, so every field is optional. Small
//! settlements usually carry `village` or `town` instead of `city`; rural
//! points may only carry `state`/`region`.

use serde::Deserialize;

/// Top-level response from `GET /reverse`.
#[derive(Debug, Default, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}
