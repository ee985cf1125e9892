// 双因素认证服务

use log::info;

use crate::api_client::ApiClient;
use crate::error::ServiceError;
use crate::models::TwoFactorSetup;
use crate::repositories::TwoFactorRepository;

use super::{fail, fail_validation};

const INVALID_CODE: &str = "The provided two factor authentication code was invalid.";

#[derive(Clone)]
pub struct TwoFactorService {
    repository: TwoFactorRepository,
}

impl TwoFactorService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repository: TwoFactorRepository::new(client),
        }
    }

    /// 开启2FA，返回待确认的二维码与密钥
    pub async fn enable(&self) -> Result<TwoFactorSetup, ServiceError> {
        self.repository
            .enable()
            .await
            .map(|response| response.data)
            .map_err(|err| {
                fail(
                    err,
                    "enable two-factor authentication",
                    "Unable to enable two-factor authentication. Please try again later.",
                )
            })
    }

    pub async fn confirm(&self, code: &str) -> Result<(), ServiceError> {
        self.repository.confirm(code).await.map_err(|err| {
            fail_validation(
                err,
                "confirm two-factor authentication",
                INVALID_CODE,
                "Unable to confirm two-factor authentication. Please try again later.",
            )
        })?;
        info!("Two-factor authentication confirmed");
        Ok(())
    }

    /// 二维码 SVG
    pub async fn qr_code(&self) -> Result<String, ServiceError> {
        self.repository
            .qr_code()
            .await
            .map(|response| response.qr_code)
            .map_err(|err| {
                fail(err, "fetch QR code", "Unable to retrieve QR code. Please try again later.")
            })
    }

    pub async fn recovery_codes(&self, code: &str) -> Result<Vec<String>, ServiceError> {
        self.repository
            .recovery_codes(code)
            .await
            .map(|codes| codes.recovery_codes)
            .map_err(|err| {
                fail_validation(
                    err,
                    "fetch recovery codes",
                    "Invalid verification code.",
                    "Unable to retrieve recovery codes. Please try again later.",
                )
            })
    }

    pub async fn regenerate_recovery_codes(&self, code: &str) -> Result<Vec<String>, ServiceError> {
        self.repository
            .regenerate_recovery_codes(code)
            .await
            .map(|codes| codes.recovery_codes)
            .map_err(|err| {
                fail_validation(
                    err,
                    "regenerate recovery codes",
                    "Invalid verification code.",
                    "Unable to regenerate recovery codes. Please try again later.",
                )
            })
    }

    pub async fn disable(&self, code: &str) -> Result<(), ServiceError> {
        self.repository.disable(code).await.map_err(|err| {
            fail_validation(
                err,
                "disable two-factor authentication",
                INVALID_CODE,
                "Unable to disable two-factor authentication. Please try again later.",
            )
        })?;
        info!("Two-factor authentication disabled");
        Ok(())
    }
}
