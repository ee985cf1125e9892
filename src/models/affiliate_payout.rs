// 联盟打款记录数据模型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{push_date, QueryFilters};

/// 打款状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    /// 待处理
    Pending,
    /// 处理中
    Processing,
    /// 已完成
    Completed,
    /// 失败
    Failed,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
        }
    }
}

/// 打款渠道返回的交易信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayoutPaymentData {
    pub transaction_id: Option<String>,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub initiated_at: Option<String>,
    pub batch_id: Option<String>,
    pub error: Option<String>,
}

/// 打款记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliatePayout {
    pub id: u64,
    /// 打款金额 (分)
    pub amount: i64,
    /// 包含的佣金条数
    pub commission_count: u32,
    pub status: PayoutStatus,
    /// 计划打款时间
    pub scheduled_at: DateTime<Utc>,
    /// 实际到账时间
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_data: Option<PayoutPaymentData>,
    pub created_at: DateTime<Utc>,
}

/// 打款详情中的佣金行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutCommission {
    pub id: u64,
    pub amount: i64,
    pub status: String,
    pub click_id: String,
    pub payment_id: u64,
    pub payment_amount: i64,
    pub payment_completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 打款详情：打款记录及其包含的佣金
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliatePayoutDetail {
    #[serde(flatten)]
    pub payout: AffiliatePayout,
    #[serde(default)]
    pub commissions: Vec<PayoutCommission>,
}

/// 打款排序字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AffiliatePayoutSort {
    #[default]
    ScheduledAt,
    PaidAt,
    CreatedAt,
    Amount,
}

impl AffiliatePayoutSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            AffiliatePayoutSort::ScheduledAt => "scheduled_at",
            AffiliatePayoutSort::PaidAt => "paid_at",
            AffiliatePayoutSort::CreatedAt => "created_at",
            AffiliatePayoutSort::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffiliatePayoutFilters {
    pub status: Option<PayoutStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort_by: AffiliatePayoutSort,
}

impl QueryFilters for AffiliatePayoutFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        push_date(&mut pairs, "from", self.from);
        push_date(&mut pairs, "to", self.to);
        pairs.push(("sort_by", self.sort_by.as_str().to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_flattens_payout_fields() {
        let json = r#"{
            "id": 7, "amount": 125000, "commission_count": 2, "status": "completed",
            "scheduled_at": "2024-05-01T00:00:00Z", "paid_at": "2024-05-02T10:00:00Z",
            "payment_data": {"transaction_id": "tx_1", "method": "paypal"},
            "created_at": "2024-04-30T12:00:00Z",
            "commissions": [{
                "id": 1, "amount": 62500, "status": "paid", "click_id": "c1",
                "payment_id": 11, "payment_amount": 250000,
                "payment_completed_at": "2024-04-20T08:00:00Z",
                "created_at": "2024-04-20T08:00:01Z"
            }]
        }"#;

        let detail: AffiliatePayoutDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.payout.id, 7);
        assert_eq!(detail.payout.status, PayoutStatus::Completed);
        assert_eq!(detail.commissions.len(), 1);
        assert_eq!(
            detail.payout.payment_data.unwrap().transaction_id.as_deref(),
            Some("tx_1")
        );
    }
}
