// 连接状态机
// 三态：connecting / connected / disconnected，只有订阅成功才算 connected

use log::{debug, warn};

/// 连接阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionPhase {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionPhase {
    /// 指示灯文字
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionPhase::Connected => "Live",
            ConnectionPhase::Connecting => "Connecting...",
            ConnectionPhase::Disconnected => "Offline",
        }
    }

    /// 指示灯提示 (标题, 说明)
    pub fn tooltip(&self) -> (&'static str, &'static str) {
        match self {
            ConnectionPhase::Connected => (
                "Real-time monitoring active",
                "Your statistics are being updated in real-time as clicks, leads, and conversions happen. No need to refresh!",
            ),
            ConnectionPhase::Connecting => (
                "Establishing connection...",
                "Connecting to real-time updates. This usually takes just a moment.",
            ),
            ConnectionPhase::Disconnected => (
                "Real-time updates unavailable",
                "Don't worry - your traffic is still being tracked. The information shown may be delayed. Refresh the page to see the latest stats.",
            ),
        }
    }
}

/// 驱动状态机的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// 开始连接或切换频道
    Connecting,
    /// socket 已建立，尚未订阅成功
    SocketOpened,
    SubscriptionSucceeded,
    SubscriptionFailed(String),
    /// 连接失败或服务不可用
    Failed(String),
    Closed,
    /// 主动离开频道
    Left,
}

/// 连接状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    phase: ConnectionPhase,
    last_error: Option<String>,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.phase == ConnectionPhase::Connected
    }

    /// 应用事件，返回新的阶段
    pub fn apply(&mut self, event: ConnectionEvent) -> ConnectionPhase {
        let next = match &event {
            ConnectionEvent::Connecting => {
                self.last_error = None;
                ConnectionPhase::Connecting
            }
            // socket 打开不代表可以接收频道事件
            ConnectionEvent::SocketOpened => match self.phase {
                ConnectionPhase::Connected => ConnectionPhase::Connected,
                _ => ConnectionPhase::Connecting,
            },
            ConnectionEvent::SubscriptionSucceeded => {
                self.last_error = None;
                ConnectionPhase::Connected
            }
            ConnectionEvent::SubscriptionFailed(error) | ConnectionEvent::Failed(error) => {
                warn!("Realtime connection lost: {}", error);
                self.last_error = Some(error.clone());
                ConnectionPhase::Disconnected
            }
            ConnectionEvent::Closed | ConnectionEvent::Left => ConnectionPhase::Disconnected,
        };

        if next != self.phase {
            debug!("Connection phase {:?} -> {:?} on {:?}", self.phase, next, event);
        }
        self.phase = next;
        next
    }
}
