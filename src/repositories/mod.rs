// 资源仓库模块
// 每个后端资源一个仓库，只负责请求与响应类型，不做错误翻译

pub mod affiliate_payout_repository;
pub mod auth_repository;
pub mod click_repository;
pub mod commission_repository;
pub mod country_repository;
pub mod customer_repository;
pub mod dashboard_repository;
pub mod lead_repository;
pub mod link_repository;
pub mod password_repository;
pub mod payout_repository;
pub mod postback_repository;
pub mod profile_repository;
pub mod two_factor_repository;

pub use affiliate_payout_repository::AffiliatePayoutRepository;
pub use auth_repository::AuthRepository;
pub use click_repository::ClickRepository;
pub use commission_repository::CommissionRepository;
pub use country_repository::CountryRepository;
pub use customer_repository::CustomerRepository;
pub use dashboard_repository::DashboardRepository;
pub use lead_repository::LeadRepository;
pub use link_repository::LinkRepository;
pub use password_repository::PasswordRepository;
pub use payout_repository::PayoutRepository;
pub use postback_repository::PostbackRepository;
pub use profile_repository::ProfileRepository;
pub use two_factor_repository::TwoFactorRepository;
