// 实时通道模块
// Pusher 协议 7 客户端，用于仪表盘实时计数

pub mod auth;
pub mod client;
pub mod protocol;
pub mod state;

pub use auth::ChannelAuthorizer;
pub use client::{connect, RealtimeEvent, RealtimeHandle};
pub use protocol::{ClientFrame, ServerFrame};
pub use state::{ConnectionEvent, ConnectionPhase, ConnectionState};

/// 点击被记录
pub const CLICK_TRACKED: &str = "click.tracked";
/// 点击转化为线索
pub const CLICK_CONVERTED: &str = "click.converted";

/// 联盟仪表盘私有频道名
pub fn dashboard_channel(affiliate_id: u64) -> String {
    format!("private-affiliates.{}.dashboard-stats", affiliate_id)
}

/// 频道订阅接口，仪表盘通过它切换频道
pub trait ChannelSubscriber {
    fn subscribe(&self, channel: &str);
    fn leave(&self, channel: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_channel_name() {
        assert_eq!(dashboard_channel(17), "private-affiliates.17.dashboard-stats");
    }
}
