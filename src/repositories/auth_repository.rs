// 登录注册仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AuthPayload, DataEnvelope, LoginRequest, MessageResponse, RegisterRequest,
    TwoFactorChallenge, TwoFactorCodeRequest,
};

#[derive(Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let response: DataEnvelope<AuthPayload> = self.client.post("/login", request).await?;
        Ok(response.data)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        let response: DataEnvelope<AuthPayload> = self.client.post("/register", request).await?;
        Ok(response.data)
    }

    /// 查询登录后是否还有待完成的2FA挑战
    pub async fn two_factor_challenge(&self) -> Result<TwoFactorChallenge, ApiError> {
        let response: DataEnvelope<TwoFactorChallenge> =
            self.client.get("/auth/verify-2fa").await?;
        Ok(response.data)
    }

    pub async fn verify_two_factor(&self, code: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .post("/auth/verify-2fa", &TwoFactorCodeRequest { code: code.to_string() })
            .await
    }
}
