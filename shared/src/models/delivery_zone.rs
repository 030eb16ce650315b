//! Delivery zone and geography DTOs

use serde::{Deserialize, Serialize};

/// `GET /api/delivery-zone/local-government` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGovernmentLookup {
    pub local_government_id: Option<String>,
    #[serde(default)]
    pub local_government_name: Option<String>,
    #[serde(default)]
    pub is_deliverable: bool,
}

/// `POST /api/delivery-zone` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneVerificationRequest {
    pub state: String,
    pub city: String,
}

/// `POST /api/delivery-zone` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneVerification {
    pub is_deliverable: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Nigerian state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoState {
    pub id: String,
    pub name: String,
}

/// Local government area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGovernment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state_id: Option<String>,
}

/// Locality inside a local government area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub local_government_id: Option<String>,
}

/// `{data: [...]}` envelope used by the list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct LocationListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}
