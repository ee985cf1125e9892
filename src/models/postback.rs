// Postback (回调通知) 数据模型
// 后端在事件发生时向联盟配置的地址发送通知，客户端只负责配置

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 回调请求方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostbackMethod {
    #[default]
    Get,
    Post,
}

impl PostbackMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostbackMethod::Get => "GET",
            PostbackMethod::Post => "POST",
        }
    }
}

/// 触发回调的事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostbackEvent {
    /// 点击
    Click,
    /// 注册
    Registration,
    /// 付费转化
    Conversion,
}

impl PostbackEvent {
    pub const ALL: [PostbackEvent; 3] = [
        PostbackEvent::Click,
        PostbackEvent::Registration,
        PostbackEvent::Conversion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostbackEvent::Click => "click",
            PostbackEvent::Registration => "registration",
            PostbackEvent::Conversion => "conversion",
        }
    }
}

/// Postback 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postback {
    pub id: String,
    /// 回调地址，必须为 https
    pub url: String,
    pub method: PostbackMethod,
    pub events: Vec<PostbackEvent>,
    pub is_active: bool,
    /// 服务端生成的签名密钥
    pub secret: String,
    /// "Key: Value" 形式的请求头
    #[serde(default)]
    pub headers: Vec<String>,
    /// 仅 POST 时使用的请求体
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BTreeMap<String, String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Postback {
    /// 密钥预览，只显示前8位
    pub fn secret_preview(&self) -> String {
        let preview: String = self.secret.chars().take(8).collect();
        format!("{}...", preview)
    }
}

/// 创建/更新 Postback 请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostbackRequest {
    pub url: String,
    pub method: PostbackMethod,
    pub events: Vec<PostbackEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postback_wire_format() {
        let json = r#"{
            "id": "pb_1", "url": "https://hooks.example.com/t", "method": "POST",
            "events": ["click", "conversion"], "is_active": true, "secret": "abcdef1234567890",
            "headers": ["X-Token: 1"], "body": {"id": "{click_id}"},
            "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let postback: Postback = serde_json::from_str(json).unwrap();
        assert_eq!(postback.method, PostbackMethod::Post);
        assert_eq!(postback.events, vec![PostbackEvent::Click, PostbackEvent::Conversion]);
        assert_eq!(postback.secret_preview(), "abcdef12...");
    }

    #[test]
    fn test_request_omits_empty_optionals() {
        let request = PostbackRequest {
            url: "https://hooks.example.com".into(),
            method: PostbackMethod::Get,
            events: vec![PostbackEvent::Registration],
            headers: None,
            body: None,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"url":"https://hooks.example.com","method":"GET","events":["registration"]}"#
        );
    }
}
