// 联盟推广面板客户端
// 登录注册、推广链接、流量与收益、Postback 配置、账户安全与实时仪表盘

pub mod api_client;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod realtime;
pub mod repositories;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

pub use api_client::ApiClient;
pub use config::Config;
pub use error::{ApiError, RealtimeError, ServiceError};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use state::PanelState;
