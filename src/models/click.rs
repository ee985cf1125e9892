// 点击记录数据模型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{push_date, QueryFilters};

/// 推广链接附带的子参数 sub1..sub3
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickExternalData {
    pub sub1: Option<String>,
    pub sub2: Option<String>,
    pub sub3: Option<String>,
}

/// 点击记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Click {
    /// 点击唯一标识符
    pub click_id: Uuid,
    /// 访客IP
    pub ip_address: String,
    /// 访客User-Agent
    pub user_agent: String,
    /// 子参数
    pub external_data: Option<ClickExternalData>,
    /// 国家代码 (ISO alpha-2)
    pub country: Option<String>,
    /// 注册后关联的用户ID
    pub user_id: Option<u64>,
    /// 归因过期时间
    pub expiration_date: DateTime<Utc>,
    /// 点击时间
    pub created_at: DateTime<Utc>,
}

/// 点击列表筛选条件，仅支持按 created_at 排序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickFilters {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl QueryFilters for ClickFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_date(&mut pairs, "from", self.from);
        push_date(&mut pairs, "to", self.to);
        pairs.push(("sort_by", "created_at".to_string()));
        pairs
    }
}
