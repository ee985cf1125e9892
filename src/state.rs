// 客户端全局状态
// 包含配置、会话存储与共享的 HTTP 客户端，各服务从这里构造

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::error::{ApiError, RealtimeError};
use crate::realtime::{self, ChannelAuthorizer, RealtimeEvent, RealtimeHandle};
use crate::services::{
    AffiliatePayoutService, AuthService, ClickService, CommissionService, CountryService, CustomerService,
    DashboardService, LeadService, LinkService, PasswordService, PayoutService, PostbackService,
    ProfileService, TwoFactorService,
};
use crate::session::{FileSessionStore, SessionStore};

/// 面板全局状态
#[derive(Clone)]
pub struct PanelState {
    /// 应用配置
    pub config: Config,
    /// 会话存储
    pub session: Arc<dyn SessionStore>,
    /// 共享 HTTP 客户端
    pub client: ApiClient,
}

impl PanelState {
    /// 创建状态，会话保存在配置指定的文件中
    ///
    /// # Arguments
    /// * `config` - 应用配置
    ///
    /// # Returns
    /// * 面板状态实例
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.app.session_path.clone()));
        Self::with_session(config, session)
    }

    /// 使用指定的会话存储
    pub fn with_session(config: Config, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let client = ApiClient::from_config(&config, session.clone())?;
        Ok(Self { config, session, client })
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    pub fn links(&self) -> LinkService {
        LinkService::new(self.client.clone())
    }

    pub fn clicks(&self) -> ClickService {
        ClickService::new(self.client.clone())
    }

    pub fn leads(&self) -> LeadService {
        LeadService::new(self.client.clone())
    }

    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.client.clone())
    }

    pub fn commissions(&self) -> CommissionService {
        CommissionService::new(self.client.clone())
    }

    pub fn affiliate_payouts(&self) -> AffiliatePayoutService {
        AffiliatePayoutService::new(self.client.clone())
    }

    pub fn payouts(&self) -> PayoutService {
        PayoutService::new(self.client.clone())
    }

    pub fn postbacks(&self) -> PostbackService {
        PostbackService::new(self.client.clone())
    }

    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.client.clone())
    }

    pub fn password(&self) -> PasswordService {
        PasswordService::new(self.client.clone())
    }

    pub fn countries(&self) -> CountryService {
        CountryService::new(self.client.clone())
    }

    pub fn two_factor(&self) -> TwoFactorService {
        TwoFactorService::new(self.client.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.client.clone())
    }

    /// 私有频道授权器
    pub fn authorizer(&self) -> ChannelAuthorizer {
        ChannelAuthorizer::new(self.config.auth_endpoint(), self.client.clone())
    }

    /// 连接实时广播服务
    pub async fn connect_realtime(
        &self,
    ) -> Result<(RealtimeHandle, UnboundedReceiver<RealtimeEvent>), RealtimeError> {
        realtime::connect(&self.config.ws_url(), self.authorizer()).await
    }
}
