// 安全设置页
// 修改密码与双因素认证 (启用 -> 扫码验证 -> 已启用，恢复码，停用)

use log::{info, warn};

use crate::error::ServiceError;
use crate::models::UpdatePasswordRequest;
use crate::services::{PasswordService, TwoFactorService};
use crate::utils::{validate_two_factor_code, InputValidator, MIN_PASSWORD_LENGTH};

/// 验证码格式错误提示
pub const INVALID_CODE_FORMAT: &str = "Please enter a valid 6-digit code";

/// 修改密码表单
pub struct PasswordForm {
    service: PasswordService,
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
    saving: bool,
    result: Option<Result<String, String>>,
}

impl PasswordForm {
    pub fn new(service: PasswordService) -> Self {
        Self {
            service,
            current_password: String::new(),
            password: String::new(),
            password_confirmation: String::new(),
            saving: false,
            result: None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// 成功消息或错误消息
    pub fn result(&self) -> Option<&Result<String, String>> {
        self.result.as_ref()
    }

    /// 本地校验：新密码至少8位且两次输入一致
    pub fn validate(&self) -> Result<(), String> {
        let mut validator = InputValidator::new();
        validator.validate_min_length("password", &self.password, MIN_PASSWORD_LENGTH);
        validator.validate_confirmation("password_confirmation", &self.password, &self.password_confirmation);
        validator.into_result()
    }

    pub async fn submit(&mut self) {
        if let Err(message) = self.validate() {
            self.result = Some(Err(message));
            return;
        }

        self.saving = true;
        self.result = None;
        let request = UpdatePasswordRequest {
            current_password: Some(self.current_password.clone()).filter(|p| !p.is_empty()),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        };

        self.result = Some(match self.service.update(&request).await {
            Ok(message) => {
                self.current_password.clear();
                self.password.clear();
                self.password_confirmation.clear();
                Ok(message)
            }
            Err(err) => Err(err.message().to_string()),
        });
        self.saving = false;
    }
}

/// 双因素认证状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwoFactorState {
    Disabled,
    /// 已生成密钥，等待用户输入验证码
    PendingVerification { svg: String, secret: String },
    Enabled,
}

/// 双因素认证面板
pub struct TwoFactorPanel {
    service: TwoFactorService,
    state: TwoFactorState,
    /// 用户输入的验证码
    pub code: String,
    recovery_codes: Option<Vec<String>>,
    busy: bool,
    error: Option<String>,
    message: Option<String>,
}

impl TwoFactorPanel {
    /// # Arguments
    /// * `enabled` - 账号当前是否已启用2FA
    pub fn new(service: TwoFactorService, enabled: bool) -> Self {
        Self {
            service,
            state: if enabled { TwoFactorState::Enabled } else { TwoFactorState::Disabled },
            code: String::new(),
            recovery_codes: None,
            busy: false,
            error: None,
            message: None,
        }
    }

    pub fn state(&self) -> &TwoFactorState {
        &self.state
    }

    pub fn recovery_codes(&self) -> Option<&[String]> {
        self.recovery_codes.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// 取出已校验的验证码，按原样校验，格式不对时设置错误并返回 None
    fn take_code(&mut self) -> Option<String> {
        if !validate_two_factor_code(&self.code) {
            self.error = Some(INVALID_CODE_FORMAT.to_string());
            return None;
        }
        self.error = None;
        self.message = None;
        Some(self.code.clone())
    }

    fn finish(&mut self, result: Result<(), ServiceError>) -> bool {
        self.busy = false;
        match result {
            Ok(()) => {
                self.code.clear();
                true
            }
            Err(err) => {
                warn!("Two-factor action failed: {}", err);
                self.error = Some(err.message().to_string());
                false
            }
        }
    }

    /// 开始启用，拿到二维码和密钥
    pub async fn enable(&mut self) {
        if self.state != TwoFactorState::Disabled {
            return;
        }
        self.busy = true;
        self.error = None;
        let result = self.service.enable().await.map(|setup| {
            self.state = TwoFactorState::PendingVerification {
                svg: setup.svg,
                secret: setup.secret,
            };
        });
        self.finish(result);
    }

    /// 放弃启用，丢弃密钥
    pub fn cancel(&mut self) {
        if matches!(self.state, TwoFactorState::PendingVerification { .. }) {
            self.state = TwoFactorState::Disabled;
            self.code.clear();
            self.error = None;
        }
    }

    /// 重新拉取待验证的二维码，保留已输入的验证码
    pub async fn refresh_qr_code(&mut self) {
        if !matches!(self.state, TwoFactorState::PendingVerification { .. }) {
            return;
        }
        self.busy = true;
        self.error = None;
        match self.service.qr_code().await {
            Ok(fresh) => {
                if let TwoFactorState::PendingVerification { svg, .. } = &mut self.state {
                    *svg = fresh;
                }
            }
            Err(err) => {
                warn!("Two-factor QR code refresh failed: {}", err);
                self.error = Some(err.message().to_string());
            }
        }
        self.busy = false;
    }

    /// 输入验证码完成启用
    pub async fn confirm(&mut self) {
        if !matches!(self.state, TwoFactorState::PendingVerification { .. }) {
            return;
        }
        let Some(code) = self.take_code() else {
            return;
        };
        self.busy = true;
        let result = self.service.confirm(&code).await;
        if self.finish(result) {
            info!("Two-factor authentication enabled");
            self.state = TwoFactorState::Enabled;
            self.message = Some("Two-factor authentication has been enabled.".to_string());
        }
    }

    /// 查看恢复码
    pub async fn show_recovery_codes(&mut self) {
        if self.state != TwoFactorState::Enabled {
            return;
        }
        let Some(code) = self.take_code() else {
            return;
        };
        self.busy = true;
        let result = self.service.recovery_codes(&code).await;
        let result = result.map(|codes| self.recovery_codes = Some(codes));
        self.finish(result);
    }

    /// 重新生成恢复码
    pub async fn regenerate_recovery_codes(&mut self) {
        if self.state != TwoFactorState::Enabled {
            return;
        }
        let Some(code) = self.take_code() else {
            return;
        };
        self.busy = true;
        let result = self.service.regenerate_recovery_codes(&code).await;
        let result = result.map(|codes| self.recovery_codes = Some(codes));
        if self.finish(result) {
            self.message = Some("Recovery codes regenerated.".to_string());
        }
    }

    pub fn hide_recovery_codes(&mut self) {
        self.recovery_codes = None;
    }

    /// 停用，需要新的验证码
    pub async fn disable(&mut self) {
        if self.state != TwoFactorState::Enabled {
            return;
        }
        let Some(code) = self.take_code() else {
            return;
        };
        self.busy = true;
        let result = self.service.disable(&code).await;
        if self.finish(result) {
            self.state = TwoFactorState::Disabled;
            self.recovery_codes = None;
            self.message = Some("Two-factor authentication has been disabled.".to_string());
        }
    }
}

/// 安全设置页
pub struct SecurityPage {
    pub password: PasswordForm,
    pub two_factor: TwoFactorPanel,
}

impl SecurityPage {
    pub fn new(password: PasswordService, two_factor: TwoFactorService, two_factor_enabled: bool) -> Self {
        Self {
            password: PasswordForm::new(password),
            two_factor: TwoFactorPanel::new(two_factor, two_factor_enabled),
        }
    }
}
