use super::DeliveryZoneApi;
use crate::{ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use shared::models::{LocalGovernmentLookup, ZoneVerification, ZoneVerificationRequest};

#[async_trait]
impl DeliveryZoneApi for NetworkHttpClient {
    async fn lookup_local_government(
        &self,
        address: &str,
        city: &str,
        state: &str,
    ) -> ClientResult<LocalGovernmentLookup> {
        let query = [
            ("address", address.to_string()),
            ("city", city.to_string()),
            ("state", state.to_string()),
        ];
        self.get_with_lookup_timeout("/api/delivery-zone/local-government", &query, None)
            .await
    }

    async fn verify_zone(&self, request: &ZoneVerificationRequest) -> ClientResult<ZoneVerification> {
        self.post_with_lookup_timeout("/api/delivery-zone", request, None)
            .await
    }
}
