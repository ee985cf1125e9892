// 联盟账户资料数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 联盟资料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateProfile {
    pub id: u64,
    pub company_name: String,
    pub email: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub telegram: Option<String>,
    /// 所在国家ID
    pub lc_country_id: u64,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 更新资料请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub company_name: String,
    pub email: String,
    pub lc_country_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<&AffiliateProfile> for UpdateProfileRequest {
    fn from(profile: &AffiliateProfile) -> Self {
        Self {
            company_name: profile.company_name.clone(),
            email: profile.email.clone(),
            lc_country_id: profile.lc_country_id,
            contact_person: profile.contact_person.clone(),
            phone: profile.phone.clone(),
            website: profile.website.clone(),
            telegram: profile.telegram.clone(),
            address: profile.address.clone(),
        }
    }
}

/// 更新资料响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub data: AffiliateProfile,
}
