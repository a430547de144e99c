//! The flow from device position to what the user sees.
//!
//! A coordinate fans out to two independent consumers: the city resolver and
//! the shift store. Neither waits on the other and a failure in one never
//! reaches the other. The coordinator also owns [`UiState`], which couples the
//! detail view to the store's selection.
//!
//! Selection and detail visibility are published together in one `UiState`
//! snapshot, so a subscriber never sees one changed without the other. The
//! store's own selection is written inside the UI channel's lock and mirrored
//! back after every fetch; the lock order is always UI, then store.

use std::sync::Arc;

use shiftmap_core::{AppConfig, Coordinate, Shift};
use shiftmap_geocode::{CityDisplayState, CityResolver, GeocodeClient};
use shiftmap_location::{LocationProvider, PermissionGate, PositionOptions, PositionSource};
use shiftmap_shifts::{FetchOutcome, ShiftListState, ShiftStore, ShiftsClient};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Last coordinate the flow received, reused by refresh.
    pub coordinate: Option<Coordinate>,
    pub detail_visible: bool,
    /// The store's selection as of this snapshot.
    pub selected: Option<Shift>,
}

/// Which view to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Detail(Shift),
    /// The detail view is open but its shift is no longer selected.
    Blank,
}

impl Screen {
    #[must_use]
    pub fn derive(ui: &UiState) -> Self {
        if !ui.detail_visible {
            return Screen::List;
        }
        match &ui.selected {
            Some(shift) => Screen::Detail(shift.clone()),
            None => Screen::Blank,
        }
    }
}

#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    location: LocationProvider,
    city: CityResolver,
    store: ShiftStore,
    ui: watch::Sender<UiState>,
}

impl Coordinator {
    #[must_use]
    pub fn new(location: LocationProvider, city: CityResolver, store: ShiftStore) -> Self {
        let (ui, _) = watch::channel(UiState::default());
        Self {
            inner: Arc::new(Inner {
                location,
                city,
                store,
                ui,
            }),
        }
    }

    /// Builds the HTTP clients and the location provider from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if either HTTP client cannot be constructed.
    pub fn from_config(
        config: &AppConfig,
        position_source: Arc<dyn PositionSource>,
        permission_gate: Option<Arc<dyn PermissionGate>>,
    ) -> Result<Self, AppError> {
        let geocoder = GeocodeClient::with_base_url(
            &config.geocode_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        let shifts = ShiftsClient::with_base_url(
            &config.shifts_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;

        let mut location =
            LocationProvider::new(position_source, PositionOptions::from_app_config(config));
        if let Some(gate) = permission_gate {
            location = location.with_permission_gate(gate);
        }

        Ok(Self::new(
            location,
            CityResolver::new(Arc::new(geocoder), config.geocode_language.clone()),
            ShiftStore::new(Arc::new(shifts), config.stale_selection),
        ))
    }

    /// Acquires the device position once and, if one is obtained, starts the
    /// city lookup and the shift fetch.
    ///
    /// Returns the fetch task, or `None` when no position was obtained.
    pub async fn trigger_location_flow(&self) -> Option<JoinHandle<FetchOutcome>> {
        let Some(coordinate) = self.inner.location.acquire().await else {
            tracing::info!("no device position; nothing to load");
            return None;
        };
        Some(self.on_position(coordinate))
    }

    /// Feeds a coordinate into the flow.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_position(&self, coordinate: Coordinate) -> JoinHandle<FetchOutcome> {
        self.inner.ui.send_modify(|ui| ui.coordinate = Some(coordinate));
        tracing::info!(%coordinate, "position received; loading city and shifts");

        self.inner.city.resolve(Some(coordinate));
        self.spawn_fetch(coordinate)
    }

    /// Re-fetches shifts for the last known coordinate.
    ///
    /// Without one this is a no-op that returns `None`.
    pub fn refresh(&self) -> Option<JoinHandle<FetchOutcome>> {
        let last = self.inner.ui.borrow().coordinate;
        let Some(coordinate) = last else {
            tracing::debug!("refresh requested before any position; ignoring");
            return None;
        };
        Some(self.spawn_fetch(coordinate))
    }

    /// Selects the listed shift with `shift_id` and opens the detail view.
    ///
    /// An unknown id changes nothing.
    pub fn select(&self, shift_id: &str) -> Option<Shift> {
        let store = &self.inner.store;
        let mut picked = None;
        self.inner.ui.send_if_modified(|ui| {
            let Some(shift) = store.select_by_id(shift_id) else {
                return false;
            };
            picked = Some(shift.clone());
            let changed = !ui.detail_visible || ui.selected.as_ref() != Some(&shift);
            ui.detail_visible = true;
            ui.selected = Some(shift);
            changed
        });
        picked
    }

    /// Closes the detail view and drops the selection.
    pub fn close_detail(&self) {
        let store = &self.inner.store;
        self.inner.ui.send_if_modified(|ui| {
            store.clear_selection();
            let changed = ui.detail_visible || ui.selected.is_some();
            ui.detail_visible = false;
            ui.selected = None;
            changed
        });
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::derive(&self.inner.ui.borrow())
    }

    #[must_use]
    pub fn shifts(&self) -> ShiftListState {
        self.inner.store.snapshot()
    }

    #[must_use]
    pub fn city(&self) -> CityDisplayState {
        self.inner.city.snapshot()
    }

    #[must_use]
    pub fn ui(&self) -> UiState {
        self.inner.ui.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_shifts(&self) -> watch::Receiver<ShiftListState> {
        self.inner.store.subscribe()
    }

    #[must_use]
    pub fn subscribe_city(&self) -> watch::Receiver<CityDisplayState> {
        self.inner.city.subscribe()
    }

    #[must_use]
    pub fn subscribe_ui(&self) -> watch::Receiver<UiState> {
        self.inner.ui.subscribe()
    }

    fn spawn_fetch(&self, coordinate: Coordinate) -> JoinHandle<FetchOutcome> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.store.fetch(coordinate).await;
            inner.sync_selection();
            outcome
        })
    }
}

impl Inner {
    /// Copies the store's selection into `UiState` after a reload may have
    /// refreshed or dropped it.
    fn sync_selection(&self) {
        self.ui.send_if_modified(|ui| {
            let selected = self.store.snapshot().selected;
            if ui.selected == selected {
                return false;
            }
            ui.selected = selected;
            true
        });
    }
}
