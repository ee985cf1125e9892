// 密码仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{MessageResponse, UpdatePasswordRequest};

#[derive(Clone)]
pub struct PasswordRepository {
    client: ApiClient,
}

impl PasswordRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn update(&self, request: &UpdatePasswordRequest) -> Result<MessageResponse, ApiError> {
        self.client.put("/account/password", request).await
    }
}
