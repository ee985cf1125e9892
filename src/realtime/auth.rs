// 私有频道授权
// POST /broadcasting/auth {socket_id, channel_name}，经共享的 ApiClient 发送
// 超时、Bearer 令牌与 401 清除会话均沿用 REST 客户端的处理

use log::error;
use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::error::{ApiError, RealtimeError};

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    socket_id: &'a str,
    channel_name: &'a str,
}

/// 授权响应，auth 形如 `key:signature`
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelAuth {
    pub auth: String,
}

#[derive(Clone)]
pub struct ChannelAuthorizer {
    client: ApiClient,
    endpoint: String,
}

impl ChannelAuthorizer {
    /// # Arguments
    /// * `endpoint` - 授权接口的完整地址
    /// * `client` - 共享的后端客户端
    pub fn new(endpoint: impl Into<String>, client: ApiClient) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// 为 socket 申请频道签名
    ///
    /// # Arguments
    /// * `socket_id` - 连接建立时服务端分配的ID
    /// * `channel` - 私有频道名
    ///
    /// # Returns
    /// * 订阅帧所需的 auth 字符串
    pub async fn authorize(&self, socket_id: &str, channel: &str) -> Result<String, RealtimeError> {
        let request = AuthRequest {
            socket_id,
            channel_name: channel,
        };
        let body: ChannelAuth = self
            .client
            .post(&self.endpoint, &request)
            .await
            .map_err(|err| {
                error!("Channel authorization for {} failed: {}", channel, err);
                authorization_error(&err)
            })?;
        Ok(body.auth)
    }
}

fn authorization_error(err: &ApiError) -> RealtimeError {
    match err {
        ApiError::Decode(reason) => RealtimeError::Authorization(format!("invalid response: {}", reason)),
        _ => match err.status() {
            Some(status) => RealtimeError::Authorization(format!("Auth failed: {}", status)),
            None => RealtimeError::Authorization(format!("request failed: {}", err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionStore};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_stalled_auth_endpoint_times_out() {
        // 接受连接但从不应答
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_token("token"));
        let client = ApiClient::new(format!("http://{}", addr), Duration::from_millis(200), session).unwrap();
        let authorizer = ChannelAuthorizer::new(format!("http://{}/broadcasting/auth", addr), client);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            authorizer.authorize("1.2", "private-affiliates.1.dashboard-stats"),
        )
        .await
        .expect("authorization should give up on its own");

        match result {
            Err(RealtimeError::Authorization(reason)) => assert!(reason.starts_with("request failed"), "{}", reason),
            other => panic!("expected an authorization error, got {:?}", other),
        }
        server.abort();
    }

    #[test]
    fn test_status_failures_keep_auth_failed_message() {
        let err = authorization_error(&ApiError::Status {
            status: 403,
            message: None,
        });
        assert_eq!(err.to_string(), "channel authorization failed: Auth failed: 403");
        assert_eq!(
            authorization_error(&ApiError::Unauthorized).to_string(),
            "channel authorization failed: Auth failed: 401"
        );
    }
}
