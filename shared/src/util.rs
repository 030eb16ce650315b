/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a payment reference: `{prefix}_{timestamp_ms}_{random}`.
///
/// The random suffix is drawn from `0..=999_999`; together with the
/// millisecond timestamp this is unique per attempt at storefront scale.
pub fn generate_reference(prefix: &str) -> String {
    use rand::Rng;
    let suffix: u32 = rand::thread_rng().gen_range(0..=999_999);
    format!("{}_{}_{}", prefix, now_millis(), suffix)
}

/// Whether `id` parses as a UUID (any version, hyphenated or simple form)
pub fn is_valid_uuid(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

/// Generate a new random identifier for client-side records
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_format() {
        let reference = generate_reference("order");
        let parts: Vec<&str> = reference.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "order");
        assert!(parts[1].parse::<i64>().is_ok());
        let suffix: u32 = parts[2].parse().unwrap();
        assert!(suffix <= 999_999);
    }

    #[test]
    fn test_reference_prefix_with_underscore() {
        let reference = generate_reference("wallet_fund");
        assert!(reference.starts_with("wallet_fund_"));
    }

    #[test]
    fn test_is_valid_uuid() {
        assert!(is_valid_uuid(&new_id()));
        assert!(is_valid_uuid("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!is_valid_uuid("item-1"));
        assert!(!is_valid_uuid(""));
    }
}
