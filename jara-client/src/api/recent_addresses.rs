use super::RecentAddressApi;
use crate::http::HttpClient;
use crate::{ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use shared::models::{LocationListResponse, RecentAddress};

#[async_trait]
impl RecentAddressApi for NetworkHttpClient {
    async fn recent_addresses(&self, user_id: &str, token: &str) -> ClientResult<Vec<RecentAddress>> {
        let query = [("userId", user_id.to_string())];
        let resp: LocationListResponse<RecentAddress> =
            self.get("/api/recent-addresses", &query, Some(token)).await?;
        Ok(resp.data)
    }

    async fn save_recent_address(&self, entry: &RecentAddress, token: &str) -> ClientResult<()> {
        let _resp: serde_json::Value = self.post("/api/recent-addresses", entry, Some(token)).await?;
        Ok(())
    }
}
