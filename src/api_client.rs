// HTTP 客户端封装
// 附加 Bearer 令牌，按状态码把失败响应归类为 ApiError

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{ApiError, ErrorBody};
use crate::session::SessionStore;

/// 后端在缺少2FA时附带的响应头
pub const AUTH_ERROR_HEADER: &str = "x-authentication-error";
pub const TWO_FACTOR_MISSING: &str = "2fa-missing";

/// 后端 REST 客户端
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// 创建客户端
    ///
    /// # Arguments
    /// * `base_url` - API基础地址
    /// * `timeout` - 请求超时
    /// * `session` - 会话存储，用于读取令牌及处理 401/2FA
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("affiliate-panel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// 根据配置创建客户端
    pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Self::new(config.api_base(), Duration::from_secs(config.api.timeout), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        };

        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// 无请求体的 POST
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// 无请求体的 PATCH
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::PATCH, path)).await
    }

    /// DELETE，忽略响应体
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        self.check(response).await.map(|_| ())
    }

    /// 带请求体的 DELETE
    pub async fn delete_with_body<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::DELETE, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let response = self.check(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 成功响应原样返回，失败响应归类
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::BAD_REQUEST && is_two_factor_missing(&response) {
            warn!("Two-factor authentication required, flag stored in session");
            self.session.set_require_two_factor(true)?;
            return Err(ApiError::TwoFactorRequired);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("Session rejected by backend, clearing local session");
            self.session.clear()?;
            return Err(ApiError::Unauthorized);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { message: body.message },
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation {
                message: body.message,
                errors: body.errors,
            },
            other => ApiError::Status {
                status: other.as_u16(),
                message: body.message,
            },
        })
    }
}

fn is_two_factor_missing(response: &Response) -> bool {
    response
        .headers()
        .get(AUTH_ERROR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == TWO_FACTOR_MISSING)
        .unwrap_or(false)
}
