// 国家数据模型

use serde::{Deserialize, Serialize};

/// 国旗表情的各种编码
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagEmoji {
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub utf8: String,
    #[serde(default)]
    pub u_code: String,
    #[serde(default)]
    pub utf16: String,
    #[serde(default)]
    pub decimal: String,
    #[serde(default)]
    pub shortcode: String,
}

/// 国家
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u64,
    pub uid: String,
    pub name: String,
    pub slug: String,
    pub official_name: String,
    pub capital: String,
    pub iso_alpha_2: String,
    pub iso_alpha_3: String,
    pub iso_numeric: u32,
    pub international_phone: String,
    #[serde(default)]
    pub flag_emoji: FlagEmoji,
}

impl Country {
    /// 名称或正式名称包含关键字 (忽略大小写)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.official_name.to_lowercase().contains(&query)
    }
}
