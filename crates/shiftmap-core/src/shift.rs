//! Shift records returned by the `map-list-unauthorized` endpoint.
//!
//! ## Wire shape
//!
//! Field names are camelCase. Date and time fields arrive pre-formatted in the
//! provider's timezone (`dateStartByCity`, `timeStartByCity`,
//! `timeEndByCity`) and are passed through untouched.
//!
//! ### Money
//! `priceWorker` and `bonusPriceWorker` arrive as JSON numbers. They are held as
//! [`Decimal`] so a value survives a parse/serialize cycle without float
//! rounding. Serialization writes them as decimal strings.
//!
//! ### `customerFeedbacksCount`
//! A count that the server sends as a string. Kept as `String`.
//!
//! ### `logo`
//! Frequently carries leading or trailing whitespace; use [`Shift::logo_uri`].
//!
//! Only `id` is required. Every display field defaults when absent or `null`
//! so one sparse record does not fail the whole list.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One kind of work a shift involves, with grammatical-number variants of its
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkType {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Form used with counts of five and above (and 11–14).
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_gt5: String,
    /// Form used with counts ending in 2–4.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_lt5: String,
    /// Form used with counts ending in 1.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_one: String,
}

impl WorkType {
    /// Picks the name variant that agrees with `count` under Russian plural
    /// rules, falling back to `name` when that variant is empty.
    #[must_use]
    pub fn name_for_count(&self, count: u32) -> &str {
        let tens = count % 100;
        let units = count % 10;
        let variant = if units == 1 && tens != 11 {
            &self.name_one
        } else if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
            &self.name_lt5
        } else {
            &self.name_gt5
        };

        if variant.is_empty() {
            &self.name
        } else {
            variant
        }
    }
}

/// A single advertised work opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_start_by_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_start_by_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_end_by_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_workers: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plan_workers: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_types: Vec<WorkType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_worker: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bonus_price_worker: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_feedbacks_count: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_promotion_enabled: bool,
}

impl Shift {
    /// The logo URI with surrounding whitespace removed, or `None` if blank.
    #[must_use]
    pub fn logo_uri(&self) -> Option<&str> {
        let trimmed = self.logo.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// `"08:00 – 20:00"`.
    #[must_use]
    pub fn time_window(&self) -> String {
        format!("{} – {}", self.time_start_by_city, self.time_end_by_city)
    }

    /// `"21.05.2025 08:00 – 20:00"`.
    #[must_use]
    pub fn schedule_label(&self) -> String {
        format!("{} {}", self.date_start_by_city, self.time_window())
    }

    /// `"2/5"`.
    #[must_use]
    pub fn workers_label(&self) -> String {
        format!("{}/{}", self.current_workers, self.plan_workers)
    }

    #[must_use]
    pub fn work_types_label(&self) -> String {
        self.work_types
            .iter()
            .map(|wt| wt.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Places still open. The server does not guarantee `current <= plan`, so
    /// this saturates at zero.
    #[must_use]
    pub fn open_slots(&self) -> u32 {
        self.plan_workers.saturating_sub(self.current_workers)
    }

    #[must_use]
    pub fn is_fully_staffed(&self) -> bool {
        self.open_slots() == 0
    }

    /// `"4.8 (12)"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!(
            "{} ({})",
            self.customer_rating, self.customer_feedbacks_count
        )
    }

    #[must_use]
    pub fn has_bonus(&self) -> bool {
        self.bonus_price_worker > Decimal::ZERO
    }
}

#[cfg(test)]
#[path = "shift_test.rs"]
mod tests;
