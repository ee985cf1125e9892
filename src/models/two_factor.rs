// 双因素认证数据模型

use serde::{Deserialize, Serialize};

/// 开启2FA时返回的二维码与密钥
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoFactorSetup {
    /// 二维码 SVG
    pub svg: String,
    /// TOTP 密钥
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorSetupResponse {
    pub message: String,
    pub data: TwoFactorSetup,
}

/// 仅携带验证码的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoFactorCodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorQrCode {
    pub qr_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryCodes {
    pub recovery_codes: Vec<String>,
}
