// 佣金数据模型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{push_date, QueryFilters};

/// 佣金状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    /// 待审核
    Pending,
    /// 已审核，等待打款
    Approved,
    /// 已打款
    Paid,
    /// 已取消
    Cancelled,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Pending => "pending",
            CommissionStatus::Approved => "approved",
            CommissionStatus::Paid => "paid",
            CommissionStatus::Cancelled => "cancelled",
        }
    }
}

/// 佣金记录，金额单位均为分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commission {
    pub id: u64,
    /// 佣金金额
    pub amount: i64,
    pub status: CommissionStatus,
    /// 产生佣金的点击
    pub click_id: String,
    /// 关联的付款记录
    pub payment_id: u64,
    /// 付款金额
    pub payment_amount: i64,
    pub payment_completed_at: DateTime<Utc>,
    /// 所属打款批次，未打款时为空
    pub payout_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// 按打款批次筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutFilter {
    /// 尚未进入任何打款批次 (`payout_id=null`)
    Unpaid,
    /// 指定打款批次
    Payout(u64),
}

/// 佣金排序字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommissionSort {
    #[default]
    CreatedAt,
    Amount,
}

impl CommissionSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionSort::CreatedAt => "created_at",
            CommissionSort::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissionFilters {
    pub status: Option<CommissionStatus>,
    pub payout: Option<PayoutFilter>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort_by: CommissionSort,
}

impl QueryFilters for CommissionFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        match self.payout {
            Some(PayoutFilter::Unpaid) => pairs.push(("payout_id", "null".to_string())),
            Some(PayoutFilter::Payout(id)) => pairs.push(("payout_id", id.to_string())),
            None => {}
        }
        push_date(&mut pairs, "from", self.from);
        push_date(&mut pairs, "to", self.to);
        pairs.push(("sort_by", self.sort_by.as_str().to_string()));
        pairs
    }
}
