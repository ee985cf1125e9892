// 双因素认证仓库

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    DataEnvelope, MessageResponse, RecoveryCodes, TwoFactorCodeRequest, TwoFactorQrCode,
    TwoFactorSetupResponse,
};

#[derive(Clone)]
pub struct TwoFactorRepository {
    client: ApiClient,
}

impl TwoFactorRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 开启2FA，返回二维码与密钥
    pub async fn enable(&self) -> Result<TwoFactorSetupResponse, ApiError> {
        self.client.post_empty("/account/two-factor-authentication").await
    }

    /// 用验证码确认开启
    pub async fn confirm(&self, code: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .post(
                "/account/confirmed-two-factor-authentication",
                &TwoFactorCodeRequest { code: code.to_string() },
            )
            .await
    }

    pub async fn qr_code(&self) -> Result<TwoFactorQrCode, ApiError> {
        self.client.get("/account/two-factor-qr-code").await
    }

    pub async fn recovery_codes(&self, code: &str) -> Result<RecoveryCodes, ApiError> {
        let response: DataEnvelope<RecoveryCodes> = self
            .client
            .post(
                "/account/two-factor-recovery-codes/view",
                &TwoFactorCodeRequest { code: code.to_string() },
            )
            .await?;
        Ok(response.data)
    }

    pub async fn regenerate_recovery_codes(&self, code: &str) -> Result<RecoveryCodes, ApiError> {
        let response: DataEnvelope<RecoveryCodes> = self
            .client
            .post(
                "/account/two-factor-recovery-codes/regenerate",
                &TwoFactorCodeRequest { code: code.to_string() },
            )
            .await?;
        Ok(response.data)
    }

    pub async fn disable(&self, code: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .delete_with_body(
                "/account/two-factor-authentication",
                &TwoFactorCodeRequest { code: code.to_string() },
            )
            .await
    }
}
