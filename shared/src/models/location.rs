//! Address and location models

use serde::{Deserialize, Serialize};

/// Geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Administrative breakdown of an address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub local_government: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_government_id: Option<String>,
}

impl LocationDetails {
    /// True when neither state nor local government is known
    pub fn is_unstructured(&self) -> bool {
        self.state.trim().is_empty() && self.local_government.trim().is_empty()
    }

    /// City to send to the zone service: locality, else local government
    pub fn city(&self) -> &str {
        if !self.locality.trim().is_empty() {
            &self.locality
        } else {
            &self.local_government
        }
    }
}

/// Whether an address is where the order is collected or delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Pickup,
    Dropoff,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }
}

/// Where the current address came from (UI affordance only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressSource {
    LocalStorage,
    CurrentLocation,
    Manual,
    #[default]
    None,
}

/// Entry in the per-device recent address cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAddress {
    pub id: String,
    pub address: String,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    /// Milliseconds since epoch
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_government: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl RecentAddress {
    /// Whether two entries name the same place for the same purpose
    pub fn same_place(&self, other: &RecentAddress) -> bool {
        self.address == other.address && self.address_type == other.address_type
    }

    /// Location details recorded with this entry
    pub fn location_details(&self) -> LocationDetails {
        LocationDetails {
            state: self.state.clone().unwrap_or_default(),
            local_government: self.local_government.clone().unwrap_or_default(),
            locality: self.locality.clone().unwrap_or_default(),
            local_government_id: None,
        }
    }
}

/// Resolved delivery address held by the checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub context_address: String,
    pub location_details: LocationDetails,
    pub coordinates: Option<Coordinates>,
    pub is_address_valid: bool,
    pub source: AddressSource,
}

impl DeliveryAddress {
    pub fn local_government_id(&self) -> Option<&str> {
        self.location_details
            .local_government_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// Address is resolved, valid and carries a local government id
    pub fn is_complete(&self) -> bool {
        self.is_address_valid
            && !self.context_address.trim().is_empty()
            && self.local_government_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_prefers_locality() {
        let details = LocationDetails {
            state: "Lagos".into(),
            local_government: "Eti-Osa".into(),
            locality: "Lekki".into(),
            local_government_id: None,
        };
        assert_eq!(details.city(), "Lekki");

        let details = LocationDetails {
            locality: String::new(),
            ..details
        };
        assert_eq!(details.city(), "Eti-Osa");
    }

    #[test]
    fn test_recent_address_type_field() {
        let entry = RecentAddress {
            id: "1".into(),
            address: "12 Marina, Lagos".into(),
            address_type: AddressType::Pickup,
            created_at: 1,
            state: Some("Lagos".into()),
            local_government: None,
            locality: None,
            coordinates: Some(Coordinates::new(6.45, 3.39)),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "pickup");
        assert_eq!(json["createdAt"], 1);
        assert_eq!(json["coordinates"]["latitude"], 6.45);
    }

    #[test]
    fn test_recent_address_without_coordinates_still_loads() {
        let entry: RecentAddress = serde_json::from_value(serde_json::json!({
            "id": "1",
            "address": "12 Marina, Lagos",
            "type": "dropoff",
            "createdAt": 5
        }))
        .unwrap();
        assert!(entry.coordinates.is_none());
        assert_eq!(entry.address_type, AddressType::Dropoff);
    }

    #[test]
    fn test_blank_local_government_id_is_absent() {
        let mut address = DeliveryAddress {
            context_address: "5 Allen Avenue".into(),
            is_address_valid: true,
            ..Default::default()
        };
        address.location_details.local_government_id = Some("  ".into());
        assert!(address.local_government_id().is_none());
        assert!(!address.is_complete());
    }
}
