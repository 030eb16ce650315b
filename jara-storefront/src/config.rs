use rust_decimal::Decimal;
use shared::models::{BROWN_BAG_PRICE, Coordinates};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | JARA_DATA_DIR | ./.jara | Directory for persisted client state |
/// | PAYSTACK_PUBLIC_KEY | (unset) | Provider public key; online payment is disabled without it |
/// | JARA_BROWN_BAG_PRICE | 200 | Price of one brown bag in Naira |
/// | JARA_DEFAULT_ORIGIN_LAT | 6.5244 | Business origin used when the vendor has no coordinates |
/// | JARA_DEFAULT_ORIGIN_LNG | 3.3792 | |
/// | JARA_SEARCH_DEBOUNCE_MS | 400 | Search input debounce |
/// | JARA_ADDRESS_DEBOUNCE_MS | 300 | Address autocomplete debounce |
/// | JARA_LOCATION_CACHE_SECS | 300 | Geography lookup cache lifetime |
/// | JARA_SAVE_FOR_LATER_CLOSE_MS | 1500 | Delay before closing the cart after saving |
/// | JARA_LOG_LEVEL | info | Log filter when RUST_LOG is unset |
/// | JARA_LOG_DIR | (unset) | Enables daily rolling log files |
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub data_dir: PathBuf,
    pub paystack_public_key: Option<String>,
    pub brown_bag_price: Decimal,
    pub default_origin: Coordinates,
    pub search_debounce: Duration,
    pub address_debounce: Duration,
    pub location_cache_ttl: Duration,
    pub save_for_later_close_delay: Duration,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".jara"),
            paystack_public_key: None,
            brown_bag_price: BROWN_BAG_PRICE,
            default_origin: Coordinates::new(6.5244, 3.3792),
            search_debounce: Duration::from_millis(400),
            address_debounce: Duration::from_millis(300),
            location_cache_ttl: Duration::from_secs(300),
            save_for_later_close_delay: Duration::from_millis(1500),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to [`Default`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("JARA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            paystack_public_key: std::env::var("PAYSTACK_PUBLIC_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            brown_bag_price: parse_env("JARA_BROWN_BAG_PRICE")
                .filter(|p: &Decimal| !p.is_sign_negative())
                .unwrap_or(defaults.brown_bag_price),
            default_origin: Coordinates::new(
                parse_env("JARA_DEFAULT_ORIGIN_LAT").unwrap_or(defaults.default_origin.latitude),
                parse_env("JARA_DEFAULT_ORIGIN_LNG").unwrap_or(defaults.default_origin.longitude),
            ),
            search_debounce: parse_env("JARA_SEARCH_DEBOUNCE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            address_debounce: parse_env("JARA_ADDRESS_DEBOUNCE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.address_debounce),
            location_cache_ttl: parse_env("JARA_LOCATION_CACHE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.location_cache_ttl),
            save_for_later_close_delay: parse_env("JARA_SAVE_FOR_LATER_CLOSE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.save_for_later_close_delay),
            log_level: std::env::var("JARA_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("JARA_LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the data directory, mainly for tests
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_paystack_key(mut self, key: impl Into<String>) -> Self {
        self.paystack_public_key = Some(key.into());
        self
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.brown_bag_price, dec!(200));
        assert_eq!(config.default_origin, Coordinates::new(6.5244, 3.3792));
        assert_eq!(config.save_for_later_close_delay, Duration::from_millis(1500));
        assert!(config.paystack_public_key.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = StorefrontConfig::default()
            .with_data_dir("/tmp/jara")
            .with_paystack_key("pk_test_123");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/jara"));
        assert_eq!(config.paystack_public_key.as_deref(), Some("pk_test_123"));
    }
}
