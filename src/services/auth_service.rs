// 登录注册服务
// 成功后把令牌与用户写入会话存储

use std::sync::Arc;

use log::{error, info, warn};

use crate::api_client::ApiClient;
use crate::error::{ApiError, ServiceError};
use crate::models::{AuthPayload, LoginRequest, RegisterRequest};
use crate::repositories::AuthRepository;
use crate::session::{Session, SessionStore, User};

use super::fail_validation;

#[derive(Clone)]
pub struct AuthService {
    repository: AuthRepository,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        let session = client.session().clone();
        Self {
            repository: AuthRepository::new(client),
            session,
        }
    }

    /// 用户名密码登录
    ///
    /// # Arguments
    /// * `username` - 用户名
    /// * `password` - 密码
    ///
    /// # Returns
    /// * 登录用户
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let payload = self.repository.login(&request).await.map_err(|err| {
            error!("Login failed for {}: {}", username, err);
            let message = err.backend_message().unwrap_or("Invalid credentials").to_string();
            ServiceError::from_api(&err, message)
        })?;
        self.store(payload)
    }

    /// 注册新联盟账户
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ServiceError> {
        let payload = self.repository.register(request).await.map_err(|err| {
            fail_validation(
                err,
                "register",
                "Validation failed",
                "Unable to create account. Please try again later.",
            )
        })?;
        self.store(payload)
    }

    /// 退出登录，清除本地会话
    pub fn logout(&self) -> Result<(), ServiceError> {
        self.session.clear().map_err(|err| {
            error!("Failed to clear session: {}", err);
            ServiceError::new("Unable to sign out. Please try again.")
        })?;
        info!("Signed out");
        Ok(())
    }

    /// 当前会话
    pub fn current_session(&self) -> Session {
        self.session.load().unwrap_or_else(|err| {
            warn!("Failed to read session, treating as signed out: {}", err);
            Session::default()
        })
    }

    /// 后端是否仍要求完成2FA
    pub async fn two_factor_pending(&self) -> Result<bool, ServiceError> {
        match self.repository.two_factor_challenge().await {
            Ok(challenge) => Ok(challenge.required),
            Err(ApiError::TwoFactorRequired) => Ok(true),
            Err(err) => Err(super::fail(
                err,
                "check two-factor challenge",
                "Unable to verify your session. Please try again later.",
            )),
        }
    }

    /// 提交登录2FA验证码，成功后清除 "需要2FA" 标志
    pub async fn verify_two_factor(&self, code: &str) -> Result<(), ServiceError> {
        self.repository.verify_two_factor(code).await.map_err(|err| {
            fail_validation(
                err,
                "verify two-factor code",
                "The provided two factor authentication code was invalid.",
                "Unable to verify two-factor code. Please try again later.",
            )
        })?;
        self.session.set_require_two_factor(false).map_err(|err| {
            error!("Failed to update session: {}", err);
            ServiceError::new("Unable to update session. Please try again.")
        })?;
        info!("Two-factor challenge completed");
        Ok(())
    }

    fn store(&self, payload: AuthPayload) -> Result<User, ServiceError> {
        let session = Session {
            token: Some(payload.token),
            user: Some(payload.user.clone()),
            require_two_factor: false,
        };
        self.session.save(&session).map_err(|err| {
            error!("Failed to persist session: {}", err);
            ServiceError::new("Unable to save your session. Please try again.")
        })?;
        info!("Signed in as {}", payload.user.username);
        Ok(payload.user)
    }
}
