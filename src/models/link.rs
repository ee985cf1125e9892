// 推广链接数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 推广链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateLink {
    /// 链接唯一标识符
    pub id: String,
    /// 推广引用ID (即 ref 参数)
    pub reference_id: String,
    /// 完整推广地址
    pub url: String,
    /// 累计点击数
    pub clicks_count: u64,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 创建推广链接请求，reference_id 为空时由后端生成
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

impl CreateLinkRequest {
    pub fn new(reference_id: Option<&str>) -> Self {
        let reference_id = reference_id
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self { reference_id }
    }
}

/// 链接校验结果，后端返回任意 JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkValidation(pub serde_json::Value);

impl LinkValidation {
    /// 后端附带的提示信息
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_reference_id_is_omitted() {
        let request = CreateLinkRequest::new(Some("   "));
        assert_eq!(serde_json::to_string(&request).unwrap(), "{}");

        let request = CreateLinkRequest::new(Some(" promo1 "));
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"reference_id":"promo1"}"#
        );
    }
}
