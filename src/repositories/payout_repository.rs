// 收款方式仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{CreatePayoutRequest, DataEnvelope, PayoutOption};

#[derive(Clone)]
pub struct PayoutRepository {
    client: ApiClient,
}

impl PayoutRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<PayoutOption>, ApiError> {
        let response: DataEnvelope<Vec<PayoutOption>> = self.client.get("/payouts").await?;
        Ok(response.data)
    }

    pub async fn create(&self, request: &CreatePayoutRequest) -> Result<PayoutOption, ApiError> {
        let response: DataEnvelope<PayoutOption> = self.client.post("/payouts", request).await?;
        Ok(response.data)
    }

    /// 设为默认，服务端负责取消其他默认项
    pub async fn set_default(&self, id: &str) -> Result<PayoutOption, ApiError> {
        let response: DataEnvelope<PayoutOption> = self
            .client
            .patch(&format!("/payouts/{}/set-default", id))
            .await?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/payouts/{}", id)).await
    }
}
