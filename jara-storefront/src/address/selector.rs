//! Address selection and delivery-zone verification
//!
//! ```text
//! Idle ─type─► Suggesting ─pick─► Verifying ─┬─► Verified ─► Selected
//!  ▲                                         └─► Rejected
//!  └──────────────── dismiss / retype ───────────────┘
//! ```
//!
//! Only pickup addresses are verified against the delivery zone service;
//! dropoff addresses go straight through without a network call. Every
//! verification takes a generation number and only the newest one may
//! write visible state.

use super::heuristic::zone_request;
use super::locator::{Geolocator, PlaceSuggestion, PlacesProvider, ResolvedPlace};
use super::recent::RecentAddressCache;
use crate::error::AddressError;
use crate::notify::{Notification, Notifier};
use jara_client::DeliveryZoneApi;
use parking_lot::Mutex;
use shared::models::{
    AddressSource, AddressType, Coordinates, DeliveryAddress, LocationDetails, RecentAddress,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorPhase {
    #[default]
    Idle,
    Suggesting,
    Verifying,
    Verified,
    Rejected,
    Selected,
}

/// Address handed to the selection callback
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedAddress {
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub local_government_id: Option<String>,
    pub details: LocationDetails,
    pub source: AddressSource,
}

impl SelectedAddress {
    pub fn into_delivery_address(self) -> DeliveryAddress {
        let mut location_details = self.details;
        location_details.local_government_id = self.local_government_id;
        DeliveryAddress {
            context_address: self.address,
            location_details,
            coordinates: self.coordinates,
            is_address_valid: true,
            source: self.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorState {
    pub phase: SelectorPhase,
    pub input: String,
    pub suggestions: Vec<PlaceSuggestion>,
    pub is_searching: bool,
    pub is_verifying: bool,
    pub error: Option<String>,
    pub selected: Option<SelectedAddress>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Selected(SelectedAddress),
    Rejected(String),
    /// A newer selection started while this one was in flight
    Superseded,
}

pub type SelectionCallback = Arc<dyn Fn(&SelectedAddress) + Send + Sync>;

/// Collaborators of an [`AddressSelector`]
#[derive(Clone)]
pub struct AddressServices {
    pub zones: Arc<dyn DeliveryZoneApi>,
    pub places: Arc<dyn PlacesProvider>,
    pub geolocator: Arc<dyn Geolocator>,
    pub recent: Arc<RecentAddressCache>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct AddressSelector {
    address_type: AddressType,
    services: AddressServices,
    debounce: Duration,
    on_select: Option<SelectionCallback>,
    state: Mutex<SelectorState>,
    input_generation: AtomicU64,
    verify_generation: AtomicU64,
}

impl AddressSelector {
    pub fn new(address_type: AddressType, services: AddressServices, debounce: Duration) -> Self {
        Self {
            address_type,
            services,
            debounce,
            on_select: None,
            state: Mutex::new(SelectorState::default()),
            input_generation: AtomicU64::new(0),
            verify_generation: AtomicU64::new(0),
        }
    }

    /// Callback invoked with `(address, coordinates, local government id)`
    /// once an address is selected
    pub fn on_select(mut self, callback: impl Fn(&SelectedAddress) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(callback));
        self
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub fn state(&self) -> SelectorState {
        self.state.lock().clone()
    }

    pub fn recent_addresses(&self) -> Vec<RecentAddress> {
        self.services.recent.for_type(self.address_type)
    }

    /// Recent addresses after merging the signed-in customer's account
    pub async fn refresh_recent_addresses(&self) -> Vec<RecentAddress> {
        self.services.recent.pull().await;
        self.recent_addresses()
    }

    // ========== Typing ==========

    /// Debounced autocomplete; stale inputs never overwrite suggestions
    pub async fn type_input(&self, text: &str) {
        let generation = self.input_generation.fetch_add(1, Ordering::SeqCst) + 1;
        // Retyping also abandons any pending verification
        self.verify_generation.fetch_add(1, Ordering::SeqCst);

        {
            let mut state = self.state.lock();
            state.input = text.to_string();
            state.error = None;
            state.is_verifying = false;
            if text.trim().is_empty() {
                state.phase = SelectorPhase::Idle;
                state.suggestions.clear();
                state.is_searching = false;
                return;
            }
            state.phase = SelectorPhase::Suggesting;
            state.is_searching = true;
        }

        tokio::time::sleep(self.debounce).await;
        if self.input_generation.load(Ordering::SeqCst) != generation {
            return;
        }

        let result = self.services.places.autocomplete(text.trim()).await;
        let mut state = self.state.lock();
        if self.input_generation.load(Ordering::SeqCst) != generation {
            return;
        }
        state.is_searching = false;
        match result {
            Ok(suggestions) => state.suggestions = suggestions,
            Err(e) => {
                tracing::warn!(error = %e, "Address autocomplete failed");
                state.suggestions.clear();
                state.error = Some(e.to_string());
            }
        }
    }

    /// Clear a rejection and return to idle
    pub fn dismiss_error(&self) {
        self.verify_generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        state.error = None;
        state.is_verifying = false;
        if matches!(state.phase, SelectorPhase::Rejected | SelectorPhase::Verifying) {
            state.phase = SelectorPhase::Idle;
        }
    }

    // ========== Picking ==========

    pub async fn pick_suggestion(
        &self,
        suggestion: &PlaceSuggestion,
    ) -> Result<SelectionOutcome, AddressError> {
        let place = match self.services.places.resolve(&suggestion.place_id).await {
            Ok(place) => place,
            Err(e) => return Err(self.fail(e)),
        };
        Ok(self.select_place(place, AddressSource::Manual).await)
    }

    pub async fn pick_recent(&self, recent: &RecentAddress) -> SelectionOutcome {
        let place = ResolvedPlace {
            address: recent.address.clone(),
            coordinates: recent.coordinates,
            details: recent.location_details(),
        };
        self.select_place(place, AddressSource::LocalStorage).await
    }

    /// Geolocate, reverse-geocode, then verify
    pub async fn use_current_location(&self) -> Result<SelectionOutcome, AddressError> {
        let place = async {
            let position = self.services.geolocator.current_position().await?;
            let mut place = self.services.places.reverse_geocode(position).await?;
            place.coordinates.get_or_insert(position);
            Ok::<_, AddressError>(place)
        }
        .await;
        match place {
            Ok(place) => Ok(self.select_place(place, AddressSource::CurrentLocation).await),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&self, error: AddressError) -> AddressError {
        tracing::warn!(error = %error, "Address selection failed");
        self.state.lock().error = Some(error.to_string());
        self.services
            .notifier
            .notify(Notification::error(error.error_code(), error.to_string()));
        error
    }

    // ========== Verification ==========

    /// Whether the zone service delivers from this address
    ///
    /// Dropoff addresses are always accepted without a request.
    pub async fn verify_address_with_api(
        &self,
        address: &str,
        details: &LocationDetails,
    ) -> Result<bool, AddressError> {
        if self.address_type == AddressType::Dropoff {
            return Ok(true);
        }
        let request = zone_request(address, details).ok_or(AddressError::Unresolvable)?;
        let verification = self.services.zones.verify_zone(&request).await?;
        tracing::debug!(
            state = %request.state,
            city = %request.city,
            deliverable = verification.is_deliverable,
            "Zone verification"
        );
        Ok(verification.is_deliverable)
    }

    async fn select_place(&self, place: ResolvedPlace, source: AddressSource) -> SelectionOutcome {
        let generation = self.verify_generation.fetch_add(1, Ordering::SeqCst) + 1;
        // Suggestions that arrive after a pick are irrelevant
        self.input_generation.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.state.lock();
            state.phase = SelectorPhase::Verifying;
            state.is_verifying = true;
            state.is_searching = false;
            state.error = None;
            state.input = place.address.clone();
        }

        let verdict = self.verify_address_with_api(&place.address, &place.details).await;
        if !self.is_current(generation) {
            return SelectionOutcome::Superseded;
        }

        if let Err(reason) = self.check_verdict(verdict) {
            let mut state = self.state.lock();
            if !self.is_current(generation) {
                return SelectionOutcome::Superseded;
            }
            state.phase = SelectorPhase::Rejected;
            state.is_verifying = false;
            state.error = Some(reason.to_string());
            drop(state);
            self.services
                .notifier
                .notify(Notification::error(reason.error_code(), reason.to_string()));
            return SelectionOutcome::Rejected(reason.to_string());
        }

        self.state.lock().phase = SelectorPhase::Verified;
        let entry = self.services.recent.upsert(
            &place.address,
            self.address_type,
            &place.details,
            place.coordinates,
        );
        self.services.recent.push(&entry).await;

        let local_government_id = self.resolve_local_government(&place).await;
        if !self.is_current(generation) {
            return SelectionOutcome::Superseded;
        }

        let selected = SelectedAddress {
            address: place.address,
            coordinates: place.coordinates,
            local_government_id,
            details: place.details,
            source,
        };
        {
            let mut state = self.state.lock();
            state.phase = SelectorPhase::Selected;
            state.is_verifying = false;
            state.suggestions.clear();
            state.selected = Some(selected.clone());
        }
        tracing::info!(
            address_type = self.address_type.as_str(),
            local_government_id = ?selected.local_government_id,
            "Address selected"
        );
        if let Some(callback) = &self.on_select {
            callback(&selected);
        }
        SelectionOutcome::Selected(selected)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.verify_generation.load(Ordering::SeqCst) == generation
    }

    /// Anything but an explicit "deliverable" rejects the address
    fn check_verdict(&self, verdict: Result<bool, AddressError>) -> Result<(), AddressError> {
        match verdict {
            Ok(true) => Ok(()),
            Ok(false) => Err(AddressError::NotDeliverable),
            Err(AddressError::Unresolvable) => Err(AddressError::Unresolvable),
            Err(e) => {
                tracing::warn!(error = %e, "Zone verification request failed");
                Err(AddressError::NotDeliverable)
            }
        }
    }

    async fn resolve_local_government(&self, place: &ResolvedPlace) -> Option<String> {
        if let Some(id) = place
            .details
            .local_government_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
        {
            return Some(id.to_string());
        }
        let fallback = zone_request(&place.address, &place.details);
        let state = match place.details.state.trim() {
            "" => fallback.as_ref().map(|r| r.state.as_str()).unwrap_or_default(),
            s => s,
        };
        let city = match place.details.city().trim() {
            "" => fallback.as_ref().map(|r| r.city.as_str()).unwrap_or_default(),
            c => c,
        };
        match self
            .services
            .zones
            .lookup_local_government(&place.address, city, state)
            .await
        {
            Ok(lookup) => lookup.local_government_id.filter(|id| !id.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Local government lookup failed");
                None
            }
        }
    }
}
