use super::FeeApi;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use shared::models::{FeeCalculationRequest, FeeCalculationResponse, FeeQuote};

#[async_trait]
impl FeeApi for NetworkHttpClient {
    async fn calculate_fees(&self, request: &FeeCalculationRequest) -> ClientResult<FeeQuote> {
        let resp: FeeCalculationResponse = self.post("/api/fees/calculate", request, None).await?;
        resp.into_quote().map_err(ClientError::Rejected)
    }
}
