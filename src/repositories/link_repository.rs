// 推广链接仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{AffiliateLink, CreateLinkRequest, DataEnvelope, LinkValidation, Paginated};

#[derive(Clone)]
pub struct LinkRepository {
    client: ApiClient,
}

impl LinkRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 创建推广链接
    pub async fn create(&self, request: &CreateLinkRequest) -> Result<AffiliateLink, ApiError> {
        let response: DataEnvelope<AffiliateLink> = self.client.post("/links", request).await?;
        Ok(response.data)
    }

    /// 分页获取推广链接，meta 中带有 website_url
    pub async fn list(&self, page: u32) -> Result<Paginated<AffiliateLink>, ApiError> {
        self.client
            .get_with_query("/links", &[("page", page.max(1).to_string())])
            .await
    }

    /// 校验推广链接
    pub async fn validate(&self, url: &str) -> Result<LinkValidation, ApiError> {
        self.client.get_with_query("/links/validate", &[("url", url)]).await
    }
}
