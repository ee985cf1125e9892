// 仪表盘页
// 启动时拉取一次权威汇总，之后由私有频道事件逐个累加计数

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::ServiceError;
use crate::models::{DashboardStats, Lead, LeadFilters, ListQuery, PageRequest, SortOrder};
use crate::realtime::{
    dashboard_channel, ChannelSubscriber, ConnectionEvent, ConnectionPhase, ConnectionState, RealtimeEvent,
    CLICK_CONVERTED, CLICK_TRACKED,
};
use crate::services::{DashboardService, LeadService, ProfileService};
use crate::utils::format_currency;

/// 计数闪烁时长
pub const PULSE_DURATION: Duration = Duration::from_millis(600);

/// 最近线索条数
pub const RECENT_LEADS_LIMIT: u32 = 15;

/// 计数闪烁，新事件重新计时
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pulse {
    until: Option<Instant>,
}

impl Pulse {
    pub fn trigger(&mut self, now: Instant) {
        self.until = Some(now + PULSE_DURATION);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.map(|until| now < until).unwrap_or(false)
    }
}

/// 实时事件对应的计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Clicks,
    Leads,
}

impl Counter {
    pub fn from_event(event: &str) -> Option<Self> {
        match event {
            CLICK_TRACKED => Some(Counter::Clicks),
            CLICK_CONVERTED => Some(Counter::Leads),
            _ => None,
        }
    }
}

/// 仪表盘卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub pulsing: bool,
}

/// 实时计数状态：汇总快照 + 频道事件 + 连接状态
#[derive(Debug, Clone, Default)]
pub struct LiveCounters {
    stats: DashboardStats,
    loaded: bool,
    channel: Option<String>,
    connection: ConnectionState,
    clicks_pulse: Pulse,
    leads_pulse: Pulse,
}

impl LiveCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.connection.phase()
    }

    /// 用 REST 快照覆盖计数
    pub fn load(&mut self, stats: DashboardStats) {
        self.stats = stats;
        self.loaded = true;
    }

    /// 切换联盟账号：先离开旧频道再订阅新频道
    ///
    /// # Arguments
    /// * `subscriber` - 频道订阅者
    /// * `affiliate_id` - 为空时直接进入 disconnected
    pub fn bind(&mut self, subscriber: &impl ChannelSubscriber, affiliate_id: Option<u64>) {
        let next = affiliate_id.map(dashboard_channel);
        if next.is_some() && next == self.channel {
            return;
        }

        if let Some(old) = self.channel.take() {
            debug!("Leaving {}", old);
            subscriber.leave(&old);
        }

        match next {
            Some(channel) => {
                self.connection.apply(ConnectionEvent::Connecting);
                subscriber.subscribe(&channel);
                self.channel = Some(channel);
            }
            None => {
                self.connection.apply(ConnectionEvent::Closed);
            }
        }
    }

    /// 离开频道并标记为 disconnected
    pub fn unbind(&mut self, subscriber: &impl ChannelSubscriber) {
        if let Some(channel) = self.channel.take() {
            subscriber.leave(&channel);
        }
        self.connection.apply(ConnectionEvent::Left);
    }

    /// 处理实时事件
    ///
    /// # Returns
    /// * 递增的计数，其他事件返回 None
    pub fn handle(&mut self, event: &RealtimeEvent, now: Instant) -> Option<Counter> {
        match event {
            RealtimeEvent::Connection { channel, event } => {
                // 旧频道的离开/失败不影响当前频道
                if channel.is_none() || channel.as_deref() == self.channel.as_deref() {
                    self.connection.apply(event.clone());
                }
                None
            }
            RealtimeEvent::Message { channel, event, .. } => {
                if Some(channel.as_str()) != self.channel.as_deref() {
                    return None;
                }
                let counter = Counter::from_event(event)?;
                match counter {
                    Counter::Clicks => {
                        self.stats.total_clicks += 1;
                        self.clicks_pulse.trigger(now);
                    }
                    Counter::Leads => {
                        self.stats.total_leads += 1;
                        self.leads_pulse.trigger(now);
                    }
                }
                Some(counter)
            }
        }
    }

    pub fn is_pulsing(&self, counter: Counter, now: Instant) -> bool {
        match counter {
            Counter::Clicks => self.clicks_pulse.is_active(now),
            Counter::Leads => self.leads_pulse.is_active(now),
        }
    }

    /// 四张统计卡片，加载前显示 "..."
    pub fn cards(&self, now: Instant) -> [StatCard; 4] {
        let value = |text: String| if self.loaded { text } else { "...".to_string() };
        [
            StatCard {
                title: "Total Clicks",
                value: value(self.stats.total_clicks.to_string()),
                pulsing: self.is_pulsing(Counter::Clicks, now),
            },
            StatCard {
                title: "Total Leads",
                value: value(self.stats.total_leads.to_string()),
                pulsing: self.is_pulsing(Counter::Leads, now),
            },
            StatCard {
                title: "Total Customers",
                value: value(self.stats.total_customers.to_string()),
                pulsing: false,
            },
            StatCard {
                title: "Total Earnings",
                value: value(format_currency(self.stats.total_earnings)),
                pulsing: false,
            },
        ]
    }
}

/// 仪表盘页状态
pub struct DashboardPage {
    stats_service: DashboardService,
    leads_service: LeadService,
    profile_service: ProfileService,
    /// 联盟资料ID，频道按此命名（不是登录用户ID）
    affiliate_id: Option<u64>,
    counters: LiveCounters,
    error: Option<ServiceError>,
    recent_leads: Vec<Lead>,
    leads_error: Option<ServiceError>,
}

impl DashboardPage {
    pub fn new(
        stats_service: DashboardService,
        leads_service: LeadService,
        profile_service: ProfileService,
    ) -> Self {
        Self {
            stats_service,
            leads_service,
            profile_service,
            affiliate_id: None,
            counters: LiveCounters::new(),
            error: None,
            recent_leads: Vec::new(),
            leads_error: None,
        }
    }

    pub fn counters(&self) -> &LiveCounters {
        &self.counters
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub fn recent_leads(&self) -> &[Lead] {
        &self.recent_leads
    }

    pub fn leads_error(&self) -> Option<&ServiceError> {
        self.leads_error.as_ref()
    }

    pub fn affiliate_id(&self) -> Option<u64> {
        self.affiliate_id
    }

    /// 加载联盟资料以确定实时频道，失败时不订阅
    pub async fn load_affiliate(&mut self) {
        match self.profile_service.get().await {
            Ok(profile) => self.affiliate_id = Some(profile.id),
            Err(err) => {
                warn!("Affiliate profile unavailable, live updates disabled: {}", err);
                self.affiliate_id = None;
            }
        }
    }

    /// 拉取汇总快照，失败时保留上一次的计数
    pub async fn load_stats(&mut self) {
        match self.stats_service.stats().await {
            Ok(stats) => {
                self.counters.load(stats);
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// 拉取最近线索
    pub async fn load_recent_leads(&mut self) {
        let query = ListQuery::new(
            LeadFilters::default(),
            SortOrder::Desc,
            PageRequest::new(1, RECENT_LEADS_LIMIT),
        );
        match self.leads_service.list(&query).await {
            Ok(page) => {
                self.recent_leads = page.data;
                self.leads_error = None;
            }
            Err(err) => self.leads_error = Some(err),
        }
    }

    /// 订阅当前联盟的统计频道，未加载资料时进入断开状态
    pub fn bind(&mut self, subscriber: &impl ChannelSubscriber) {
        if let Some(id) = self.affiliate_id {
            info!("Binding dashboard to affiliate {}", id);
        }
        self.counters.bind(subscriber, self.affiliate_id);
    }

    pub fn unbind(&mut self, subscriber: &impl ChannelSubscriber) {
        self.counters.unbind(subscriber);
    }

    /// 处理实时事件，转化事件会重新拉取最近线索
    pub async fn handle(&mut self, event: &RealtimeEvent) -> Option<Counter> {
        let counter = self.counters.handle(event, Instant::now());
        if counter == Some(Counter::Leads) {
            self.load_recent_leads().await;
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl ChannelSubscriber for Recorder {
        fn subscribe(&self, channel: &str) {
            self.calls.borrow_mut().push(format!("subscribe {}", channel));
        }

        fn leave(&self, channel: &str) {
            self.calls.borrow_mut().push(format!("leave {}", channel));
        }
    }

    fn message(channel: &str, event: &str) -> RealtimeEvent {
        RealtimeEvent::Message {
            channel: channel.to_string(),
            event: event.to_string(),
            data: json!({}),
        }
    }

    fn connection(channel: Option<&str>, event: ConnectionEvent) -> RealtimeEvent {
        RealtimeEvent::Connection {
            channel: channel.map(str::to_string),
            event,
        }
    }

    #[test]
    fn test_connected_only_after_subscription_succeeded() {
        let recorder = Recorder::default();
        let mut counters = LiveCounters::new();
        counters.bind(&recorder, Some(7));
        let channel = "private-affiliates.7.dashboard-stats";

        assert_eq!(counters.phase(), ConnectionPhase::Connecting);
        counters.handle(&connection(None, ConnectionEvent::SocketOpened), Instant::now());
        assert_eq!(counters.phase(), ConnectionPhase::Connecting);

        counters.handle(&connection(Some(channel), ConnectionEvent::SubscriptionSucceeded), Instant::now());
        assert_eq!(counters.phase(), ConnectionPhase::Connected);

        counters.handle(&connection(None, ConnectionEvent::Closed), Instant::now());
        assert_eq!(counters.phase(), ConnectionPhase::Disconnected);
    }

    #[test]
    fn test_each_event_increments_one_counter() {
        let recorder = Recorder::default();
        let mut counters = LiveCounters::new();
        counters.load(DashboardStats {
            total_clicks: 10,
            total_leads: 2,
            total_customers: 1,
            total_earnings: 1250,
        });
        counters.bind(&recorder, Some(7));
        let channel = "private-affiliates.7.dashboard-stats";
        let now = Instant::now();

        assert_eq!(counters.handle(&message(channel, CLICK_TRACKED), now), Some(Counter::Clicks));
        assert_eq!(counters.handle(&message(channel, CLICK_CONVERTED), now), Some(Counter::Leads));
        assert_eq!(counters.handle(&message(channel, "other"), now), None);
        assert_eq!(counters.handle(&message("private-affiliates.8.dashboard-stats", CLICK_TRACKED), now), None);

        let stats = counters.stats();
        assert_eq!((stats.total_clicks, stats.total_leads, stats.total_customers), (11, 3, 1));

        assert!(counters.is_pulsing(Counter::Clicks, now));
        assert!(!counters.is_pulsing(Counter::Clicks, now + PULSE_DURATION));

        let cards = counters.cards(now);
        assert_eq!(cards[0].value, "11");
        assert_eq!(cards[3].value, "$12.50");
        assert!(!cards[2].pulsing);
    }

    #[test]
    fn test_pulse_restarts_on_new_event() {
        let start = Instant::now();
        let mut pulse = Pulse::default();
        assert!(!pulse.is_active(start));

        pulse.trigger(start);
        pulse.trigger(start + Duration::from_millis(500));
        assert!(pulse.is_active(start + Duration::from_millis(900)));
        assert!(!pulse.is_active(start + Duration::from_millis(1100)));
    }

    #[test]
    fn test_rebind_leaves_old_channel_first() {
        let recorder = Recorder::default();
        let mut counters = LiveCounters::new();
        counters.bind(&recorder, Some(1));
        counters.bind(&recorder, Some(1));
        counters.bind(&recorder, Some(2));

        // 旧频道的离开事件不会覆盖新频道的状态
        counters.handle(
            &connection(Some("private-affiliates.1.dashboard-stats"), ConnectionEvent::Left),
            Instant::now(),
        );
        assert_eq!(counters.phase(), ConnectionPhase::Connecting);

        counters.unbind(&recorder);
        assert_eq!(counters.phase(), ConnectionPhase::Disconnected);
        assert_eq!(
            *recorder.calls.borrow(),
            vec![
                "subscribe private-affiliates.1.dashboard-stats",
                "leave private-affiliates.1.dashboard-stats",
                "subscribe private-affiliates.2.dashboard-stats",
                "leave private-affiliates.2.dashboard-stats",
            ]
        );
    }

    #[test]
    fn test_missing_affiliate_is_disconnected() {
        let recorder = Recorder::default();
        let mut counters = LiveCounters::new();
        counters.bind(&recorder, None);
        assert_eq!(counters.phase(), ConnectionPhase::Disconnected);
        assert!(recorder.calls.borrow().is_empty());
        assert_eq!(counters.cards(Instant::now())[0].value, "...");
    }
}
