//! Observable shift-list state.
//!
//! [`ShiftStore`] is the single writer of [`ShiftListState`]. Views hold
//! `watch` receivers and only ever see whole snapshots: every mutation runs
//! under the channel's write lock.
//!
//! Fetches are tagged with a monotonically increasing sequence number. A
//! completion is applied only if no newer fetch has been issued since, so two
//! overlapping fetches resolve to the one issued last regardless of which
//! response arrives first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shiftmap_core::{Coordinate, Shift, StaleSelection};
use tokio::sync::watch;

use crate::client::ShiftSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftListState {
    /// Shifts in server order.
    pub shifts: Vec<Shift>,
    pub loading: bool,
    /// Empty when the latest fetch did not fail.
    pub error: String,
    pub selected: Option<Shift>,
    /// Whether any fetch has ever succeeded.
    pub has_loaded: bool,
}

impl ShiftListState {
    #[must_use]
    pub fn phase(&self) -> ListPhase {
        if self.loading {
            ListPhase::Loading
        } else if !self.error.is_empty() {
            ListPhase::Errored
        } else if self.has_loaded {
            ListPhase::Loaded
        } else {
            ListPhase::Idle
        }
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// A reload over a list that is already on screen (pull-to-refresh).
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.loading && !self.shifts.is_empty()
    }

    /// The first load, with nothing to show yet.
    #[must_use]
    pub fn is_initial_load(&self) -> bool {
        self.loading && self.shifts.is_empty()
    }

    #[must_use]
    pub fn find(&self, shift_id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|shift| shift.id == shift_id)
    }
}

/// How a call to [`ShiftStore::fetch`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { count: usize },
    Failed { message: String },
    /// A newer fetch was issued before this one completed; its result was
    /// dropped.
    Superseded,
}

#[derive(Clone)]
pub struct ShiftStore {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn ShiftSource>,
    stale_selection: StaleSelection,
    state: watch::Sender<ShiftListState>,
    issued: AtomicU64,
}

impl ShiftStore {
    #[must_use]
    pub fn new(source: Arc<dyn ShiftSource>, stale_selection: StaleSelection) -> Self {
        let (state, _) = watch::channel(ShiftListState::default());
        Self {
            inner: Arc::new(Inner {
                source,
                stale_selection,
                state,
                issued: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ShiftListState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ShiftListState> {
        self.inner.state.subscribe()
    }

    /// Loads shifts near `coordinate`.
    ///
    /// On failure the previous list stays visible and `error` describes the
    /// failure. Errors never escape this method.
    pub async fn fetch(&self, coordinate: Coordinate) -> FetchOutcome {
        let inner = &self.inner;

        let mut seq = 0;
        inner.state.send_modify(|state| {
            seq = inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error.clear();
        });
        tracing::debug!(%coordinate, seq, "fetching shifts");

        let result = inner.source.shifts_near(coordinate).await;

        let mut outcome = FetchOutcome::Superseded;
        inner.state.send_if_modified(|state| {
            if inner.issued.load(Ordering::SeqCst) != seq {
                return false;
            }
            match result {
                Ok(shifts) => {
                    outcome = FetchOutcome::Loaded {
                        count: shifts.len(),
                    };
                    state.selected = reconcile_selection(
                        state.selected.take(),
                        &shifts,
                        inner.stale_selection,
                    );
                    state.shifts = shifts;
                    state.has_loaded = true;
                    state.error.clear();
                }
                Err(err) => {
                    let message = err.to_string();
                    state.error.clone_from(&message);
                    outcome = FetchOutcome::Failed { message };
                }
            }
            state.loading = false;
            true
        });

        match &outcome {
            FetchOutcome::Loaded { count } => {
                tracing::info!(%coordinate, seq, count, "shifts loaded");
            }
            FetchOutcome::Failed { message } => {
                tracing::warn!(%coordinate, seq, error = %message, "shift fetch failed");
            }
            FetchOutcome::Superseded => {
                tracing::debug!(%coordinate, seq, "discarded superseded shift fetch");
            }
        }
        outcome
    }

    /// Marks `shift` as selected. Re-selecting the same shift is a no-op.
    pub fn select(&self, shift: Shift) {
        self.inner.state.send_if_modified(|state| {
            if state.selected.as_ref() == Some(&shift) {
                return false;
            }
            state.selected = Some(shift);
            true
        });
    }

    /// Selects the shift with `shift_id` from the current list.
    ///
    /// Returns `None` and leaves the state untouched when no such shift is
    /// listed.
    pub fn select_by_id(&self, shift_id: &str) -> Option<Shift> {
        let mut found = None;
        self.inner.state.send_if_modified(|state| {
            let Some(shift) = state.find(shift_id).cloned() else {
                return false;
            };
            found = Some(shift.clone());
            if state.selected.as_ref() == Some(&shift) {
                return false;
            }
            state.selected = Some(shift);
            true
        });
        found
    }

    /// Drops the selection. Safe to call when nothing is selected.
    pub fn clear_selection(&self) {
        self.inner
            .state
            .send_if_modified(|state| state.selected.take().is_some());
    }
}

/// Carries a selection across a list reload.
///
/// A selection whose id is still listed is swapped for the fresh record. One
/// whose id vanished is kept or dropped according to `policy`.
fn reconcile_selection(
    selected: Option<Shift>,
    shifts: &[Shift],
    policy: StaleSelection,
) -> Option<Shift> {
    let selected = selected?;
    match shifts.iter().find(|shift| shift.id == selected.id) {
        Some(fresh) => Some(fresh.clone()),
        None => match policy {
            StaleSelection::Keep => Some(selected),
            StaleSelection::Clear => {
                tracing::debug!(shift_id = %selected.id, "selected shift left the list; clearing");
                None
            }
        },
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
