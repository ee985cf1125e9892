// 流量与收益列表页
// 点击、线索、客户、佣金、打款记录，全部基于通用列表页

use chrono::{DateTime, Utc};

use crate::error::ServiceError;
use crate::models::{AffiliatePayout, AffiliatePayoutDetail, Click, Commission, CommissionStatus, Customer, CustomerStatus, Lead, PayoutStatus};
use crate::services::{AffiliatePayoutService, ClickService, CommissionService, CustomerService, LeadService};
use crate::utils::{country_flag_with_code, format_currency};

use super::listing::ListPage;

pub type ClicksPage = ListPage<ClickService>;
pub type LeadsPage = ListPage<LeadService>;
pub type CustomersPage = ListPage<CustomerService>;
pub type CommissionsPage = ListPage<CommissionService>;
pub type AffiliatePayoutsPage = ListPage<AffiliatePayoutService>;

/// 表格中的时间格式
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y %H:%M").to_string()
}

fn optional_datetime(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_datetime).unwrap_or_else(|| "—".to_string())
}

/// 首字母大写的状态标签
fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn customer_status_label(status: CustomerStatus) -> String {
    title_case(status.as_str())
}

pub fn commission_status_label(status: CommissionStatus) -> String {
    title_case(status.as_str())
}

pub fn payout_status_label(status: PayoutStatus) -> String {
    title_case(status.as_str())
}

/// 表格渲染：表头与行
pub trait TableRow {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Click {
    const HEADERS: &'static [&'static str] = &["Click ID", "Country", "IP Address", "Sub IDs", "Created At"];

    fn cells(&self) -> Vec<String> {
        let subs = self
            .external_data
            .as_ref()
            .map(|data| {
                [&data.sub1, &data.sub2, &data.sub3]
                    .iter()
                    .filter_map(|sub| sub.as_deref().filter(|s| !s.is_empty()))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|subs| !subs.is_empty())
            .unwrap_or_else(|| "—".to_string());

        vec![
            self.click_id.to_string(),
            country_flag_with_code(self.country.as_deref()),
            self.ip_address.clone(),
            subs,
            format_datetime(&self.created_at),
        ]
    }
}

impl TableRow for Lead {
    const HEADERS: &'static [&'static str] = &["Email", "Country", "Status", "Commission", "Signed Up"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            country_flag_with_code(self.country.as_deref()),
            title_case(&self.status),
            format_currency(self.total_commission_earned),
            format_datetime(&self.signed_up_at),
        ]
    }
}

impl TableRow for Customer {
    const HEADERS: &'static [&'static str] = &[
        "Email", "Country", "Status", "Purchases", "Total Spent", "Commission", "Last Purchase",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            country_flag_with_code(self.country.as_deref()),
            customer_status_label(self.status),
            self.purchase_count.to_string(),
            format_currency(self.total_spent),
            format_currency(self.total_commission_earned),
            format_datetime(&self.last_purchase_at),
        ]
    }
}

impl TableRow for Commission {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Status", "Amount", "Click ID", "Payment", "Payment Amount", "Payout", "Created At",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("#{}", self.id),
            commission_status_label(self.status),
            format_currency(self.amount),
            self.click_id.clone(),
            format!("#{}", self.payment_id),
            format_currency(self.payment_amount),
            self.payout_id.map(|id| format!("#{}", id)).unwrap_or_else(|| "Unpaid".to_string()),
            format_datetime(&self.created_at),
        ]
    }
}

impl TableRow for AffiliatePayout {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Status", "Amount", "Commissions", "Scheduled At", "Paid At", "Created At",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("#{}", self.id),
            payout_status_label(self.status),
            format_currency(self.amount),
            self.commission_count.to_string(),
            format_datetime(&self.scheduled_at),
            optional_datetime(self.paid_at.as_ref()),
            format_datetime(&self.created_at),
        ]
    }
}

/// 打款页的两个标签页
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayoutsTab {
    #[default]
    Payouts,
    Commissions,
}

/// 打款页：打款记录与佣金两个列表，各自独立的筛选与分页
pub struct PayoutsPage {
    tab: PayoutsTab,
    detail: Option<Result<AffiliatePayoutDetail, ServiceError>>,
    pub payouts: AffiliatePayoutsPage,
    pub commissions: CommissionsPage,
}

impl PayoutsPage {
    pub fn new(payouts: AffiliatePayoutService, commissions: CommissionService) -> Self {
        Self {
            tab: PayoutsTab::default(),
            detail: None,
            payouts: ListPage::new(payouts),
            commissions: ListPage::new(commissions),
        }
    }

    pub fn tab(&self) -> PayoutsTab {
        self.tab
    }

    /// 切换标签页并加载该列表
    pub async fn select_tab(&mut self, tab: PayoutsTab) {
        self.tab = tab;
        match tab {
            PayoutsTab::Payouts => self.payouts.load().await,
            PayoutsTab::Commissions => self.commissions.load().await,
        }
    }

    /// 打开打款详情
    pub async fn open_detail(&mut self, id: u64) {
        self.detail = Some(self.payouts.source().find(id).await);
    }

    pub fn detail(&self) -> Option<&Result<AffiliatePayoutDetail, ServiceError>> {
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_row() {
        let commission: Commission = serde_json::from_str(
            r#"{"id": 3, "amount": 1250, "status": "approved", "click_id": "c-1", "payment_id": 9,
                "payment_amount": 5000, "payment_completed_at": "2024-02-01T10:00:00Z",
                "payout_id": null, "created_at": "2024-02-01T10:00:05Z"}"#,
        )
        .unwrap();

        let cells = commission.cells();
        assert_eq!(cells.len(), Commission::HEADERS.len());
        assert_eq!(cells[1], "Approved");
        assert_eq!(cells[2], "$12.50");
        assert_eq!(cells[6], "Unpaid");
        assert_eq!(cells[7], "Feb 1, 2024 10:00");
    }

    #[test]
    fn test_click_row_without_country_or_subs() {
        let click: Click = serde_json::from_str(
            r#"{"click_id": "1f0c6b8e-8d0e-4f64-9d6a-0c7d1f2e3a4b", "ip_address": "10.0.0.1",
                "user_agent": "curl", "external_data": {"sub1": "fb", "sub2": null, "sub3": ""},
                "country": null, "user_id": null,
                "expiration_date": "2024-03-01T00:00:00Z", "created_at": "2024-02-01T00:00:00Z"}"#,
        )
        .unwrap();

        let cells = click.cells();
        assert_eq!(cells[1], "—");
        assert_eq!(cells[3], "fb");
    }
}
