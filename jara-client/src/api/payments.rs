use super::PaymentApi;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult, NetworkHttpClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{
    PaymentVerificationResponse, WalletBalance, WalletBalanceResponse, WalletFundingRequest,
    WalletFundingResponse,
};

#[async_trait]
impl PaymentApi for NetworkHttpClient {
    async fn wallet_balance(&self, user_id: &str, token: &str) -> ClientResult<Decimal> {
        let query = [("userId", user_id.to_string())];
        let resp: WalletBalanceResponse = self.get("/api/wallet/balance", &query, Some(token)).await?;
        Ok(resp.data.balance)
    }

    async fn verify_payment(
        &self,
        reference: &str,
        provider: &str,
        token: &str,
    ) -> ClientResult<PaymentVerificationResponse> {
        let path = format!("/api/payments/verify/{}", reference);
        let query = [("provider", provider.to_string())];
        self.get(&path, &query, Some(token)).await
    }

    async fn fund_wallet(
        &self,
        request: &WalletFundingRequest,
        token: &str,
    ) -> ClientResult<WalletBalance> {
        let resp: WalletFundingResponse = self.post("/api/wallet/fund", request, Some(token)).await?;
        match (resp.success, resp.data) {
            (true, Some(balance)) => Ok(balance),
            _ => Err(ClientError::Rejected(
                resp.message
                    .unwrap_or_else(|| "Failed to fund wallet".to_string()),
            )),
        }
    }
}
