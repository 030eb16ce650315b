use super::SearchApi;
use crate::{ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use shared::models::{BusinessSearchQuery, SearchResponse};

#[async_trait]
impl SearchApi for NetworkHttpClient {
    async fn search_businesses(&self, query: &BusinessSearchQuery) -> ClientResult<SearchResponse> {
        self.get_with_lookup_timeout("/businesses/search", &query.to_pairs(), None)
            .await
    }
}
