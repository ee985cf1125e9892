// 修改密码数据模型

use serde::{Deserialize, Serialize};

/// 修改密码请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}
