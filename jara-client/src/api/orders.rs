use super::OrderApi;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use shared::models::{
    CreateOrderResponse, CreatedOrder, OrderDetails, OrderDetailsResponse, OrderPayload,
    SaveForLaterRequest,
};

#[async_trait]
impl OrderApi for NetworkHttpClient {
    async fn create_order(&self, payload: &OrderPayload, token: &str) -> ClientResult<CreatedOrder> {
        let resp: CreateOrderResponse = self.post("/api/orders", payload, Some(token)).await?;
        match resp.data {
            Some(data) if !data.order.id.is_empty() => Ok(data.order),
            _ => Err(ClientError::Rejected(
                resp.message
                    .unwrap_or_else(|| "Order was not created".to_string()),
            )),
        }
    }

    async fn order_details(&self, order_id: &str, token: &str) -> ClientResult<OrderDetails> {
        let path = format!("/api/orders/{}", order_id);
        let resp: OrderDetailsResponse = self.get(&path, &[], Some(token)).await?;
        resp.data
            .map(|d| d.into_inner())
            .ok_or_else(|| ClientError::InvalidResponse("Missing order data".into()))
    }

    async fn save_for_later(&self, request: &SaveForLaterRequest, token: &str) -> ClientResult<()> {
        let _resp: serde_json::Value = self.post("/api/save-for-later", request, Some(token)).await?;
        Ok(())
    }
}
