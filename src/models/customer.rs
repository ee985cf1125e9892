// 付费客户数据模型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{push_date, QueryFilters};

/// 客户状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// 正常
    Active,
    /// 暂停
    Suspended,
    /// 封禁
    Banned,
    /// 不活跃
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Suspended => "suspended",
            CustomerStatus::Banned => "banned",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

/// 客户：至少完成一次付费的线索
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub email: String,
    pub status: CustomerStatus,
    /// 累计佣金 (分)
    pub total_commission_earned: i64,
    /// 累计消费 (分)
    pub total_spent: i64,
    /// 付费次数
    pub purchase_count: u32,
    pub country: Option<String>,
    pub first_purchase_at: DateTime<Utc>,
    pub last_purchase_at: DateTime<Utc>,
}

/// 客户列表筛选条件，按 completed_at 排序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilters {
    pub status: Option<CustomerStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl QueryFilters for CustomerFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        push_date(&mut pairs, "from", self.from);
        push_date(&mut pairs, "to", self.to);
        pairs.push(("sort_by", "completed_at".to_string()));
        pairs
    }
}
