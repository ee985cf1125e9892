// 国家仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{Country, DataEnvelope};

#[derive(Clone)]
pub struct CountryRepository {
    client: ApiClient,
}

impl CountryRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Country>, ApiError> {
        let response: DataEnvelope<Vec<Country>> = self.client.get("/countries").await?;
        Ok(response.data)
    }

    /// 按ID或slug查询，后端共用同一路由
    pub async fn find(&self, id_or_slug: &str) -> Result<Country, ApiError> {
        let response: DataEnvelope<Country> =
            self.client.get(&format!("/countries/{}", id_or_slug)).await?;
        Ok(response.data)
    }
}
