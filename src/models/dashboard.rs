// 仪表盘统计数据模型

use serde::{Deserialize, Serialize};

/// 仪表盘汇总数据，由 `GET /stats/dashboard` 返回
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_clicks: u64,
    pub total_leads: u64,
    pub total_customers: u64,
    /// 累计收益 (分)
    pub total_earnings: i64,
}
