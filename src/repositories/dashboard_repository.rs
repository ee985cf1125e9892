// 仪表盘统计仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{DashboardStats, DataEnvelope};

#[derive(Clone)]
pub struct DashboardRepository {
    client: ApiClient,
}

impl DashboardRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let response: DataEnvelope<DashboardStats> = self.client.get("/stats/dashboard").await?;
        Ok(response.data)
    }
}
