use super::LocationApi;
use crate::http::HttpClient;
use crate::{ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use shared::models::{GeoState, LocalGovernment, Locality, LocationListResponse};

#[async_trait]
impl LocationApi for NetworkHttpClient {
    async fn states(&self) -> ClientResult<Vec<GeoState>> {
        let resp: LocationListResponse<GeoState> =
            self.get("/delivery-locations/states", &[], None).await?;
        Ok(resp.data)
    }

    async fn local_governments_for_state(&self, state_id: &str) -> ClientResult<Vec<LocalGovernment>> {
        let path = format!("/delivery-locations/states/{}/local-governments", state_id);
        let resp: LocationListResponse<LocalGovernment> = self.get(&path, &[], None).await?;
        Ok(resp.data)
    }

    async fn local_governments(&self) -> ClientResult<Vec<LocalGovernment>> {
        let resp: LocationListResponse<LocalGovernment> =
            self.get("/delivery-locations/local-governments", &[], None).await?;
        Ok(resp.data)
    }

    async fn localities(&self, local_government_id: &str) -> ClientResult<Vec<Locality>> {
        let path = format!(
            "/delivery-locations/local-governments/{}/localities",
            local_government_id
        );
        let resp: LocationListResponse<Locality> = self.get(&path, &[], None).await?;
        Ok(resp.data)
    }
}
