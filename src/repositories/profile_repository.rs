// 账户资料仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{AffiliateProfile, DataEnvelope, UpdateProfileRequest, UpdateProfileResponse};

#[derive(Clone)]
pub struct ProfileRepository {
    client: ApiClient,
}

impl ProfileRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<AffiliateProfile, ApiError> {
        let response: DataEnvelope<AffiliateProfile> = self.client.get("/account/profile").await?;
        Ok(response.data)
    }

    pub async fn update(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, ApiError> {
        self.client.put("/account/profile", request).await
    }
}
