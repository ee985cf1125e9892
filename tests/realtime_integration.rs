// 实时仪表盘端到端测试：私有频道授权、订阅、计数与离开

mod common;

use std::time::{Duration, Instant};

use affiliate_panel::pages::dashboard::Counter;
use affiliate_panel::pages::{DashboardPage, LiveCounters};
use affiliate_panel::realtime::{
    self, dashboard_channel, ChannelAuthorizer, ConnectionPhase, RealtimeEvent, CLICK_CONVERTED,
    CLICK_TRACKED,
};
use affiliate_panel::services::{DashboardService, LeadService, ProfileService};
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

use common::{
    channel_signature, start_backend, start_broadcaster, MockBackend, ReceivedFrame, PROFILE_ID, SOCKET_ID,
    TOKEN, TWO_FACTOR_PENDING_TOKEN, USER_ID,
};

fn authorizer(backend: &MockBackend, token: &str) -> ChannelAuthorizer {
    let (client, _) = backend.client(Some(token));
    ChannelAuthorizer::new(format!("{}/broadcasting/auth", backend.base_url), client)
}

fn dashboard_page(backend: &MockBackend, token: &str) -> DashboardPage {
    let (client, _) = backend.client(Some(token));
    DashboardPage::new(
        DashboardService::new(client.clone()),
        LeadService::new(client.clone()),
        ProfileService::new(client),
    )
}

fn channel_event(channel: &str, event: &str) -> Value {
    json!({
        "event": event,
        "channel": channel,
        "data": json!({ "click_id": 99 }).to_string()
    })
}

async fn next_event(events: &mut UnboundedReceiver<RealtimeEvent>) -> RealtimeEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for realtime event")
        .expect("realtime connection closed")
}

/// 持续处理事件直到阶段满足条件
async fn drive_until(
    counters: &mut LiveCounters,
    events: &mut UnboundedReceiver<RealtimeEvent>,
    phase: ConnectionPhase,
) {
    while counters.phase() != phase {
        let event = next_event(events).await;
        counters.handle(&event, Instant::now());
    }
}

#[actix_web::test]
async fn test_live_counters_follow_private_channel() {
    let backend = start_backend().await;
    let (addr, push, mut frames) = start_broadcaster().await;
    let url = format!("ws://{}/app/{}?protocol=7", addr, common::APP_KEY);

    let (handle, mut events) = realtime::connect(&url, authorizer(&backend, TOKEN)).await.unwrap();
    let channel = dashboard_channel(PROFILE_ID);

    let mut counters = LiveCounters::new();
    counters.load(Default::default());
    counters.bind(&handle, Some(PROFILE_ID));
    assert_eq!(counters.phase(), ConnectionPhase::Connecting);

    drive_until(&mut counters, &mut events, ConnectionPhase::Connected).await;
    assert_eq!(
        frames.recv().await,
        Some(ReceivedFrame::Subscribe {
            channel: channel.clone(),
            auth: channel_signature(SOCKET_ID, &channel),
        })
    );

    push.send(channel_event(&channel, CLICK_TRACKED)).unwrap();
    push.send(channel_event(&dashboard_channel(8), CLICK_TRACKED)).unwrap();
    push.send(channel_event(&channel, CLICK_CONVERTED)).unwrap();

    let mut seen = Vec::new();
    while seen.len() < 2 {
        let event = next_event(&mut events).await;
        if let Some(counter) = counters.handle(&event, Instant::now()) {
            seen.push(counter);
        }
    }
    assert_eq!(seen, vec![Counter::Clicks, Counter::Leads]);
    assert_eq!(counters.stats().total_clicks, 1);
    assert_eq!(counters.stats().total_leads, 1);
    assert!(counters.is_pulsing(Counter::Clicks, Instant::now()));

    counters.unbind(&handle);
    assert_eq!(counters.phase(), ConnectionPhase::Disconnected);
    assert_eq!(frames.recv().await, Some(ReceivedFrame::Unsubscribe { channel }));

    handle.disconnect().await;
}

#[actix_web::test]
async fn test_rejected_authorization_disconnects() {
    let backend = start_backend().await;
    let (addr, _push, _frames) = start_broadcaster().await;
    let url = format!("ws://{}/app/{}?protocol=7", addr, common::APP_KEY);

    let (handle, mut events) = realtime::connect(&url, authorizer(&backend, "stolen-token")).await.unwrap();

    let mut counters = LiveCounters::new();
    counters.bind(&handle, Some(PROFILE_ID));
    drive_until(&mut counters, &mut events, ConnectionPhase::Disconnected).await;

    let error = counters.connection().last_error().unwrap_or_default();
    assert!(error.contains("Auth failed: 403"), "unexpected error: {}", error);
    assert!(!backend.recorded.requests().is_empty());

    handle.disconnect().await;
}

#[actix_web::test]
async fn test_dashboard_refetches_leads_on_conversion() {
    let backend = start_backend().await;
    let (addr, push, _frames) = start_broadcaster().await;
    let url = format!("ws://{}/app/{}?protocol=7", addr, common::APP_KEY);

    let mut dashboard = dashboard_page(&backend, TOKEN);
    dashboard.load_stats().await;
    dashboard.load_recent_leads().await;
    assert_eq!(dashboard.counters().stats().total_leads, 14);
    assert_eq!(dashboard.recent_leads().len(), 2);

    let (handle, mut events) = realtime::connect(&url, authorizer(&backend, TOKEN)).await.unwrap();
    dashboard.load_affiliate().await;
    assert_eq!(dashboard.affiliate_id(), Some(PROFILE_ID));
    dashboard.bind(&handle);
    while dashboard.counters().phase() != ConnectionPhase::Connected {
        let event = next_event(&mut events).await;
        dashboard.handle(&event).await;
    }

    let channel = dashboard_channel(PROFILE_ID);
    push.send(channel_event(&channel, CLICK_CONVERTED)).unwrap();
    loop {
        let event = next_event(&mut events).await;
        if dashboard.handle(&event).await == Some(Counter::Leads) {
            break;
        }
    }
    assert_eq!(dashboard.counters().stats().total_leads, 15);

    let lead_fetches = backend
        .recorded
        .requests()
        .into_iter()
        .filter(|r| r.starts_with("GET /leads?"))
        .count();
    assert_eq!(lead_fetches, 2);

    dashboard.unbind(&handle);
    handle.disconnect().await;
}

#[actix_web::test]
async fn test_dashboard_binds_profile_channel_not_user_channel() {
    let backend = start_backend().await;
    let (addr, _push, mut frames) = start_broadcaster().await;
    let url = format!("ws://{}/app/{}?protocol=7", addr, common::APP_KEY);
    let (handle, mut events) = realtime::connect(&url, authorizer(&backend, TOKEN)).await.unwrap();

    // 按登录用户ID命名的频道不属于该联盟
    let mut counters = LiveCounters::new();
    counters.bind(&handle, Some(USER_ID));
    drive_until(&mut counters, &mut events, ConnectionPhase::Disconnected).await;
    let error = counters.connection().last_error().unwrap_or_default();
    assert!(error.contains("Auth failed: 403"), "unexpected error: {}", error);
    counters.unbind(&handle);

    let mut dashboard = dashboard_page(&backend, TOKEN);
    dashboard.load_affiliate().await;
    dashboard.bind(&handle);
    while dashboard.counters().phase() != ConnectionPhase::Connected {
        let event = next_event(&mut events).await;
        dashboard.handle(&event).await;
    }

    let channel = dashboard_channel(PROFILE_ID);
    assert_eq!(dashboard.counters().channel(), Some(channel.as_str()));
    assert_eq!(
        frames.recv().await,
        Some(ReceivedFrame::Subscribe {
            channel: channel.clone(),
            auth: channel_signature(SOCKET_ID, &channel),
        })
    );
    assert!(backend
        .recorded
        .requests()
        .contains(&"GET /account/profile".to_string()));

    dashboard.unbind(&handle);
    handle.disconnect().await;
}

#[actix_web::test]
async fn test_dashboard_stays_offline_without_profile() {
    let backend = start_backend().await;
    let (addr, _push, _frames) = start_broadcaster().await;
    let url = format!("ws://{}/app/{}?protocol=7", addr, common::APP_KEY);
    let (handle, _events) = realtime::connect(&url, authorizer(&backend, TOKEN)).await.unwrap();

    let mut dashboard = dashboard_page(&backend, TWO_FACTOR_PENDING_TOKEN);
    dashboard.load_affiliate().await;
    assert_eq!(dashboard.affiliate_id(), None);

    dashboard.bind(&handle);
    assert_eq!(dashboard.counters().phase(), ConnectionPhase::Disconnected);
    assert_eq!(dashboard.counters().channel(), None);
    assert!(!backend
        .recorded
        .requests()
        .iter()
        .any(|r| r.starts_with("POST /broadcasting/auth")));

    handle.disconnect().await;
}
