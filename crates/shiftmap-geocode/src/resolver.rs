//! City display state driven by reverse geocoding.
//!
//! Each call to [`CityResolver::resolve`] supersedes the previous one: the
//! older lookup task is aborted, and even if it manages to finish first its
//! result is dropped because its generation no longer matches. Only the most
//! recently issued coordinate can write to the state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use shiftmap_core::Coordinate;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::client::ReverseGeocoder;

/// Shown in place of a city when the lookup fails.
pub const CITY_LOOKUP_FAILED: &str = "could not determine city";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityDisplayState {
    pub city: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CityDisplayState {
    /// Header text for the shift list, e.g. `"Shifts in Moscow"`.
    #[must_use]
    pub fn headline(&self) -> Option<String> {
        self.city.as_ref().map(|city| format!("Shifts in {city}"))
    }
}

#[derive(Clone)]
pub struct CityResolver {
    inner: Arc<Inner>,
}

struct Inner {
    geocoder: Arc<dyn ReverseGeocoder>,
    language: String,
    state: watch::Sender<CityDisplayState>,
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl CityResolver {
    #[must_use]
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, language: impl Into<String>) -> Self {
        let (state, _) = watch::channel(CityDisplayState::default());
        Self {
            inner: Arc::new(Inner {
                geocoder,
                language: language.into(),
                state,
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> CityDisplayState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CityDisplayState> {
        self.inner.state.subscribe()
    }

    /// Starts resolving `coordinate`, or clears the state when it is `None`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn resolve(&self, coordinate: Option<Coordinate>) {
        let inner = &self.inner;

        // Bumping the generation and publishing the new state happen under the
        // channel lock, so a late completion can never slip in between.
        let mut generation = 0;
        inner.state.send_modify(|state| {
            generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = CityDisplayState {
                loading: coordinate.is_some(),
                ..CityDisplayState::default()
            };
        });

        let previous = inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = previous {
            handle.abort();
            tracing::debug!(generation, "aborted superseded city lookup");
        }

        let Some(coordinate) = coordinate else {
            return;
        };

        let task_inner = Arc::clone(inner);
        let handle = tokio::spawn(async move {
            let result = task_inner
                .geocoder
                .city_name(coordinate, &task_inner.language)
                .await;

            let next = match result {
                Ok(city) => {
                    tracing::debug!(%coordinate, %city, "city resolved");
                    CityDisplayState {
                        city: Some(city),
                        loading: false,
                        error: None,
                    }
                }
                Err(err) => {
                    tracing::warn!(%coordinate, error = %err, "city lookup failed");
                    CityDisplayState {
                        city: None,
                        loading: false,
                        error: Some(CITY_LOOKUP_FAILED.to_owned()),
                    }
                }
            };

            let applied = task_inner.state.send_if_modified(|state| {
                if task_inner.generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *state = next;
                true
            });
            if !applied {
                tracing::debug!(%coordinate, generation, "discarded stale city lookup");
            }
        });

        *inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle.abort_handle());
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
