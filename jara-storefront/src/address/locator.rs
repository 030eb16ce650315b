//! Place search and device location seams

use crate::error::AddressError;
use async_trait::async_trait;
use shared::models::{Coordinates, LocationDetails};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

/// A place resolved to an address, coordinates and administrative details
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub details: LocationDetails,
}

/// Autocomplete, place details and reverse geocoding
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, AddressError>;

    async fn resolve(&self, place_id: &str) -> Result<ResolvedPlace, AddressError>;

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<ResolvedPlace, AddressError>;
}

/// Device position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, AddressError>;
}
