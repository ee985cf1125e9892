// Postback 仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{DataEnvelope, Postback, PostbackRequest};

#[derive(Clone)]
pub struct PostbackRepository {
    client: ApiClient,
}

impl PostbackRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Postback>, ApiError> {
        let response: DataEnvelope<Vec<Postback>> = self.client.get("/postbacks").await?;
        Ok(response.data)
    }

    pub async fn create(&self, request: &PostbackRequest) -> Result<Postback, ApiError> {
        let response: DataEnvelope<Postback> = self.client.post("/postbacks", request).await?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, request: &PostbackRequest) -> Result<Postback, ApiError> {
        let response: DataEnvelope<Postback> = self
            .client
            .put(&format!("/postbacks/{}", id), request)
            .await?;
        Ok(response.data)
    }

    /// 启用/停用
    pub async fn toggle(&self, id: &str) -> Result<Postback, ApiError> {
        let response: DataEnvelope<Postback> = self
            .client
            .patch(&format!("/postbacks/{}/toggle", id))
            .await?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/postbacks/{}", id)).await
    }
}
