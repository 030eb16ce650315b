//! Vendor and customer references

use super::location::Coordinates;
use serde::{Deserialize, Serialize};

/// Vendor the cart is ordered from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub business_type: Option<String>,
}

/// Signed-in customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Authenticated session: customer plus bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: Customer,
    pub token: String,
}
