// Pusher 协议帧编解码

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::RealtimeError;

pub const CONNECTION_ESTABLISHED: &str = "pusher:connection_established";
pub const SUBSCRIBE: &str = "pusher:subscribe";
pub const UNSUBSCRIBE: &str = "pusher:unsubscribe";
pub const SUBSCRIPTION_SUCCEEDED: &str = "pusher_internal:subscription_succeeded";
pub const SUBSCRIPTION_ERROR: &str = "pusher:subscription_error";
pub const ERROR: &str = "pusher:error";
pub const PING: &str = "pusher:ping";
pub const PONG: &str = "pusher:pong";

/// 线上原始帧，data 可能是字符串化的 JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct EstablishedData {
    socket_id: String,
    #[serde(default)]
    activity_timeout: Option<u64>,
}

/// 服务端下发的帧
#[derive(Debug, Clone, PartialEq)]
pub enum ServerFrame {
    ConnectionEstablished {
        socket_id: String,
        activity_timeout: Option<u64>,
    },
    SubscriptionSucceeded {
        channel: String,
    },
    SubscriptionError {
        channel: Option<String>,
        status: Option<u16>,
        error: String,
    },
    Error {
        code: Option<u16>,
        message: String,
    },
    Ping,
    Pong,
    /// 频道内的业务事件
    ChannelEvent {
        channel: String,
        event: String,
        data: Value,
    },
}

impl ServerFrame {
    /// 解析一条文本帧
    pub fn parse(text: &str) -> Result<Self, RealtimeError> {
        let raw: RawFrame = serde_json::from_str(text)?;
        let data = unwrap_data(raw.data);

        let frame = match raw.event.as_str() {
            CONNECTION_ESTABLISHED => {
                let established: EstablishedData = serde_json::from_value(data)?;
                ServerFrame::ConnectionEstablished {
                    socket_id: established.socket_id,
                    activity_timeout: established.activity_timeout,
                }
            }
            SUBSCRIPTION_SUCCEEDED => ServerFrame::SubscriptionSucceeded {
                channel: raw.channel.ok_or_else(|| {
                    RealtimeError::Protocol("subscription_succeeded without channel".into())
                })?,
            },
            SUBSCRIPTION_ERROR => ServerFrame::SubscriptionError {
                channel: raw.channel,
                status: data.get("status").and_then(Value::as_u64).map(|s| s as u16),
                error: data
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| data.to_string()),
            },
            ERROR => ServerFrame::Error {
                code: data.get("code").and_then(Value::as_u64).map(|c| c as u16),
                message: data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            },
            PING => ServerFrame::Ping,
            PONG => ServerFrame::Pong,
            _ => match raw.channel {
                Some(channel) => ServerFrame::ChannelEvent {
                    channel,
                    event: raw.event,
                    data,
                },
                None => {
                    return Err(RealtimeError::Protocol(format!(
                        "unexpected event without channel: {}",
                        raw.event
                    )))
                }
            },
        };
        Ok(frame)
    }
}

/// 字符串化的 data 还原为 JSON，失败时保留原字符串
fn unwrap_data(data: Value) -> Value {
    match data {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

/// 客户端发送的帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFrame {
    Subscribe { channel: String, auth: String },
    Unsubscribe { channel: String },
    Pong,
}

impl ClientFrame {
    pub fn encode(&self) -> String {
        let frame = match self {
            ClientFrame::Subscribe { channel, auth } => {
                json!({ "event": SUBSCRIBE, "data": { "auth": auth, "channel": channel } })
            }
            ClientFrame::Unsubscribe { channel } => {
                json!({ "event": UNSUBSCRIBE, "data": { "channel": channel } })
            }
            ClientFrame::Pong => json!({ "event": PONG, "data": {} }),
        };
        frame.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connection_established_with_string_data() {
        let text = r#"{"event":"pusher:connection_established","data":"{\"socket_id\":\"123.456\",\"activity_timeout\":30}"}"#;
        assert_eq!(
            ServerFrame::parse(text).unwrap(),
            ServerFrame::ConnectionEstablished {
                socket_id: "123.456".into(),
                activity_timeout: Some(30)
            }
        );
    }

    #[test]
    fn test_parse_channel_event_and_errors() {
        let text = r#"{"event":"click.tracked","channel":"private-affiliates.1.dashboard-stats","data":"{\"click_id\":\"abc\"}"}"#;
        match ServerFrame::parse(text).unwrap() {
            ServerFrame::ChannelEvent { event, data, .. } => {
                assert_eq!(event, "click.tracked");
                assert_eq!(data["click_id"], "abc");
            }
            other => panic!("unexpected frame {:?}", other),
        }

        let text = r#"{"event":"pusher:subscription_error","channel":"private-x","data":{"type":"AuthError","error":"Forbidden","status":403}}"#;
        assert_eq!(
            ServerFrame::parse(text).unwrap(),
            ServerFrame::SubscriptionError {
                channel: Some("private-x".into()),
                status: Some(403),
                error: "Forbidden".into()
            }
        );

        assert!(ServerFrame::parse(r#"{"event":"orphan"}"#).is_err());
        assert!(ServerFrame::parse("not json").is_err());
    }

    #[test]
    fn test_encode_subscribe() {
        let frame = ClientFrame::Subscribe {
            channel: "private-a".into(),
            auth: "key:sig".into(),
        };
        let value: Value = serde_json::from_str(&frame.encode()).unwrap();
        assert_eq!(value["event"], "pusher:subscribe");
        assert_eq!(value["data"]["channel"], "private-a");
        assert_eq!(value["data"]["auth"], "key:sig");
    }
}
