//! State/city guess for free-form addresses
//!
//! Only used when the place provider returned no structured details.

use shared::models::{LocationDetails, ZoneVerificationRequest};

/// Keyword → (state, city)
const KNOWN_REGIONS: &[(&str, &str, &str)] = &[
    ("lagos", "Lagos", "Lagos"),
    ("abuja", "FCT", "Abuja"),
    ("kano", "Kano", "Kano"),
    ("rivers", "Rivers", "Port Harcourt"),
    ("ogun", "Ogun", "Abeokuta"),
];

/// Match the first known region mentioned in `address`
pub fn infer_region(address: &str) -> Option<ZoneVerificationRequest> {
    let lower = address.to_lowercase();
    KNOWN_REGIONS
        .iter()
        .find(|(keyword, _, _)| lower.contains(keyword))
        .map(|(_, state, city)| ZoneVerificationRequest {
            state: state.to_string(),
            city: city.to_string(),
        })
}

/// Zone request from structured details, falling back to [`infer_region`]
pub fn zone_request(address: &str, details: &LocationDetails) -> Option<ZoneVerificationRequest> {
    if !details.is_unstructured() {
        let state = details.state.trim();
        let city = details.city().trim();
        if !state.is_empty() {
            return Some(ZoneVerificationRequest {
                state: state.to_string(),
                city: if city.is_empty() { state } else { city }.to_string(),
            });
        }
    }
    infer_region(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_region() {
        let req = infer_region("12 Marina, LAGOS Island").unwrap();
        assert_eq!(req.state, "Lagos");
        assert_eq!(infer_region("Plot 5, Wuse 2, Abuja").unwrap().state, "FCT");
        assert!(infer_region("Somewhere in Enugu").is_none());
    }

    #[test]
    fn test_structured_details_win() {
        let details = LocationDetails {
            state: "Lagos".into(),
            local_government: "Eti-Osa".into(),
            locality: "Lekki".into(),
            local_government_id: None,
        };
        let req = zone_request("Near Kano market", &details).unwrap();
        assert_eq!(req.state, "Lagos");
        assert_eq!(req.city, "Lekki");
    }

    #[test]
    fn test_unstructured_uses_heuristic() {
        let req = zone_request("Trans Amadi, Rivers", &LocationDetails::default()).unwrap();
        assert_eq!(req.state, "Rivers");
        assert_eq!(req.city, "Port Harcourt");
    }
}
