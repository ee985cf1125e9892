// 错误类型定义
// HTTP层 ApiError，服务层 ServiceError，实时通道 RealtimeError

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::pages::navigation::Route;

/// 会话持久化错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}

/// 后端错误响应体 `{ message, errors }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: HashMap<String, Vec<String>>,
}

/// HTTP 层错误，按状态码分类
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401，本地会话已清除
    #[error("unauthenticated")]
    Unauthorized,
    /// 400 + `x-authentication-error: 2fa-missing`
    #[error("two-factor authentication required")]
    TwoFactorRequired,
    /// 422 校验失败
    #[error("validation failed: {}", .message.as_deref().unwrap_or("no message"))]
    Validation {
        message: Option<String>,
        errors: HashMap<String, Vec<String>>,
    },
    /// 404
    #[error("resource not found")]
    NotFound { message: Option<String> },
    /// 其他非 2xx 状态
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// 对应的 HTTP 状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::TwoFactorRequired => Some(400),
            ApiError::Validation { .. } => Some(422),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::Session(_) => None,
        }
    }

    /// 需要跳转的页面
    pub fn redirect(&self) -> Option<Route> {
        match self {
            ApiError::Unauthorized => Some(Route::Login { require_2fa: false }),
            ApiError::TwoFactorRequired => Some(Route::Login { require_2fa: true }),
            _ => None,
        }
    }

    /// 后端返回的 message 字段
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::NotFound { message }
            | ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 指定字段的第一条校验错误
    pub fn first_field_error(&self, field: &str) -> Option<&str> {
        match self {
            ApiError::Validation { errors, .. } => {
                errors.get(field).and_then(|messages| messages.first()).map(String::as_str)
            }
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// 服务层错误：面向用户的提示文本，以及可能的跳转
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
    redirect: Option<Route>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: None,
        }
    }

    /// 保留 API 错误携带的跳转，使用给定提示文本
    pub fn from_api(err: &ApiError, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: err.redirect(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn redirect(&self) -> Option<&Route> {
        self.redirect.as_ref()
    }
}

/// 实时通道错误
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("channel authorization failed: {0}")]
    Authorization(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("connection closed")]
    Closed,
}

impl From<serde_json::Error> for RealtimeError {
    fn from(err: serde_json::Error) -> Self {
        RealtimeError::Protocol(err.to_string())
    }
}
