//! Address resolution and delivery-zone verification

mod heuristic;
mod locator;
mod recent;
mod selector;
mod zones;

pub use heuristic::{infer_region, zone_request};
pub use locator::{Geolocator, PlaceSuggestion, PlacesProvider, ResolvedPlace};
pub use recent::{AccountSync, MAX_RECENT_ADDRESSES, RECENT_DISPLAY_LIMIT, RecentAddressCache};
pub use selector::{
    AddressSelector, AddressServices, SelectedAddress, SelectionCallback, SelectionOutcome,
    SelectorPhase, SelectorState,
};
pub use zones::DeliveryLocations;
