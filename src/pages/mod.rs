// 页面状态模块
// 每个页面组合服务与本地状态 (筛选、表单、弹窗)，渲染层只读取这些状态

pub mod auth;
pub mod confirm;
pub mod dashboard;
pub mod link_builder;
pub mod listing;
pub mod navigation;
pub mod pagination;
pub mod payout_options;
pub mod postbacks;
pub mod profile;
pub mod security;
pub mod select;
pub mod traffic;

// 重新导出常用页面
pub use auth::{LoginPage, RegisterPage, TwoFactorChallengePage};
pub use confirm::{ConfirmDialog, DELETE_CONFIRMATION};
pub use dashboard::{DashboardPage, LiveCounters};
pub use link_builder::{compose_link, LinkBuilderPage, LinkComposer};
pub use listing::{ListPage, ListState, ListView};
pub use navigation::{Route, Sidebar};
pub use pagination::page_window;
pub use payout_options::PayoutOptionsPage;
pub use postbacks::{PostbackDetailPage, PostbackForm, PostbacksPage};
pub use profile::ProfilePage;
pub use security::{SecurityPage, TwoFactorPanel, TwoFactorState};
pub use select::SearchableSelect;
pub use traffic::{AffiliatePayoutsPage, ClicksPage, CommissionsPage, CustomersPage, LeadsPage, PayoutsPage, TableRow};
