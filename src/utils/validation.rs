// 数据验证工具函数
// 提供表单输入验证和格式检查功能

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// 新密码最小长度
pub const MIN_PASSWORD_LENGTH: usize = 8;

static HTTPS_URL: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
static TWO_FACTOR_CODE: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Postback 地址必须为 https
///
/// # Arguments
/// * `url` - 回调地址
///
/// # Returns
/// * 是否以 `https://` 开头
pub fn validate_https_url(url: &str) -> bool {
    matches(&HTTPS_URL, r"^https://.*", url)
}

/// 验证邮箱地址格式
pub fn validate_email(email: &str) -> bool {
    matches(&EMAIL, r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$", email)
}

/// 验证码必须恰好为6位ASCII数字
pub fn validate_two_factor_code(code: &str) -> bool {
    matches(&TWO_FACTOR_CODE, r"^[0-9]{6}$", code)
}

/// 通用表单验证器，按字段收集错误
#[derive(Debug, Default)]
pub struct InputValidator {
    errors: HashMap<String, Vec<String>>,
}

impl InputValidator {
    /// 创建新的验证器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加字段验证错误
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// 验证必填字段
    pub fn validate_required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(field, "This field is required");
        }
    }

    /// 验证最小长度 (按字符计)
    pub fn validate_min_length(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add_error(field, &format!("Must be at least {} characters", min));
        }
    }

    /// 验证邮箱格式
    pub fn validate_email_field(&mut self, field: &str, email: &str) {
        if !validate_email(email) {
            self.add_error(field, "Invalid email format");
        }
    }

    /// 两个字段必须一致
    pub fn validate_confirmation(&mut self, field: &str, value: &str, confirmation: &str) {
        if value != confirmation {
            self.add_error(field, "Passwords do not match");
        }
    }

    /// 指定字段的第一条错误
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)?.first().map(String::as_str)
    }

    /// 转换为结果，失败时返回按字段排序后的第一条错误
    pub fn into_result(self) -> Result<(), String> {
        let mut fields: Vec<_> = self.errors.into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        match fields.into_iter().next() {
            Some((_, mut messages)) if !messages.is_empty() => Err(messages.remove(0)),
            _ => Ok(()),
        }
    }
}
