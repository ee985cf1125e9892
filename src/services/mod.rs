// 服务层模块
// 包装仓库，把 API 错误翻译为面向用户的提示

pub mod affiliate_payout_service;
pub mod auth_service;
pub mod click_service;
pub mod commission_service;
pub mod country_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod lead_service;
pub mod link_service;
pub mod password_service;
pub mod payout_service;
pub mod postback_service;
pub mod profile_service;
pub mod two_factor_service;

// 重新导出服务
pub use affiliate_payout_service::AffiliatePayoutService;
pub use auth_service::AuthService;
pub use click_service::ClickService;
pub use commission_service::CommissionService;
pub use country_service::CountryService;
pub use customer_service::CustomerService;
pub use dashboard_service::DashboardService;
pub use lead_service::LeadService;
pub use link_service::LinkService;
pub use password_service::PasswordService;
pub use payout_service::PayoutService;
pub use postback_service::PostbackService;
pub use profile_service::ProfileService;
pub use two_factor_service::TwoFactorService;

use log::error;

use crate::error::{ApiError, ServiceError};
use crate::models::{ListQuery, Paginated, QueryFilters};

/// 分页列表数据源，列表页通过它拉取数据
#[allow(async_fn_in_trait)]
pub trait ListSource {
    type Item;
    type Filters: QueryFilters + Clone + Default;

    async fn fetch(
        &self,
        query: &ListQuery<Self::Filters>,
    ) -> Result<Paginated<Self::Item>, ServiceError>;
}

/// 记录原始错误，返回固定提示
pub(crate) fn fail(err: ApiError, action: &str, message: &str) -> ServiceError {
    error!("Failed to {}: {}", action, err);
    ServiceError::from_api(&err, message)
}

/// 422 时使用后端消息 (缺省为 `fallback`)，否则使用 `message`
pub(crate) fn fail_validation(
    err: ApiError,
    action: &str,
    fallback: &str,
    message: &str,
) -> ServiceError {
    if err.is_validation() {
        error!("Failed to {}: {}", action, err);
        let text = err.backend_message().unwrap_or(fallback).to_string();
        return ServiceError::from_api(&err, text);
    }
    fail(err, action, message)
}

/// 404 时使用固定的 "未找到" 提示
pub(crate) fn fail_not_found(
    err: ApiError,
    action: &str,
    not_found: &str,
    message: &str,
) -> ServiceError {
    if err.is_not_found() {
        error!("Failed to {}: {}", action, err);
        return ServiceError::from_api(&err, not_found);
    }
    fail(err, action, message)
}
