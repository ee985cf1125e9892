// 线索 (注册用户) 数据模型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{push_date, QueryFilters};

/// 线索：通过推广链接注册的用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: u64,
    pub email: String,
    pub status: String,
    /// 该用户累计产生的佣金 (分)
    pub total_commission_earned: i64,
    pub country: Option<String>,
    pub signed_up_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilters {
    pub status: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl QueryFilters for LeadFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        push_date(&mut pairs, "from", self.from);
        push_date(&mut pairs, "to", self.to);
        pairs.push(("sort_by", "created_at".to_string()));
        pairs
    }
}
