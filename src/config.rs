// 配置管理模块
// 负责加载和管理客户端配置：后端地址、实时广播服务、会话文件

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use anyhow::{Result, Context};

/// 应用程序配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 后端API配置
    pub api: ApiConfig,
    /// 实时广播配置
    pub broadcast: BroadcastConfig,
    /// 应用配置
    pub app: AppConfig,
}

/// 后端API配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API基础地址
    pub base_url: String,
    /// 请求超时时间 (秒)
    pub timeout: u64,
}

/// 广播服务协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastScheme {
    Http,
    Https,
}

/// 实时广播 (Pusher 协议) 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// 应用Key
    pub app_key: String,
    /// 主机
    pub host: String,
    /// 端口
    pub port: u16,
    /// https 时使用 wss
    pub scheme: BroadcastScheme,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 支持邮箱
    pub support_email: String,
    /// 统计标签ID，仅透传
    pub analytics_tag_id: Option<String>,
    /// 错误上报DSN，仅透传
    pub error_reporting_dsn: Option<String>,
    /// 会话文件路径
    pub session_path: PathBuf,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // 加载.env文件，忽略错误

        Ok(Config {
            api: ApiConfig {
                base_url: env::var("API_URL")
                    .unwrap_or_else(|_| "http://localhost:9000".to_string()),
                timeout: env::var("API_TIMEOUT")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("Invalid API_TIMEOUT")?,
            },
            broadcast: BroadcastConfig {
                app_key: env::var("REVERB_APP_KEY").unwrap_or_else(|_| "app-key".to_string()),
                host: env::var("REVERB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("REVERB_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Invalid REVERB_PORT")?,
                scheme: match env::var("REVERB_SCHEME").as_deref() {
                    Ok("https") => BroadcastScheme::Https,
                    Ok("http") | Err(_) => BroadcastScheme::Http,
                    Ok(other) => anyhow::bail!("Invalid REVERB_SCHEME: {}", other),
                },
            },
            app: AppConfig {
                support_email: env::var("SUPPORT_EMAIL")
                    .unwrap_or_else(|_| "support@example.com".to_string()),
                analytics_tag_id: env::var("GTM_ID").ok().filter(|s| !s.is_empty()),
                error_reporting_dsn: env::var("SENTRY_DSN").ok().filter(|s| !s.is_empty()),
                session_path: env::var("SESSION_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".affiliate-session.json")),
            },
        })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        // 验证API配置
        let api = url::Url::parse(&self.api.base_url).context("API_URL is not a valid URL")?;
        if !matches!(api.scheme(), "http" | "https") {
            anyhow::bail!("API_URL must use http or https");
        }

        if self.api.timeout == 0 {
            anyhow::bail!("API timeout cannot be 0");
        }

        // 验证广播配置
        if self.broadcast.app_key.is_empty() {
            anyhow::bail!("Broadcast app key cannot be empty");
        }

        if self.broadcast.port == 0 {
            anyhow::bail!("Broadcast port cannot be 0");
        }

        Ok(())
    }

    /// API基础地址，去掉末尾的斜杠
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// 私有频道授权地址
    pub fn auth_endpoint(&self) -> String {
        format!("{}/broadcasting/auth", self.api_base())
    }

    /// WebSocket 连接地址
    pub fn ws_url(&self) -> String {
        let scheme = match self.broadcast.scheme {
            BroadcastScheme::Http => "ws",
            BroadcastScheme::Https => "wss",
        };
        format!(
            "{}://{}:{}/app/{}?protocol=7&client=rust&version={}&flash=false",
            scheme,
            self.broadcast.host,
            self.broadcast.port,
            self.broadcast.app_key,
            env!("CARGO_PKG_VERSION")
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: "http://localhost:9000".to_string(),
                timeout: 30,
            },
            broadcast: BroadcastConfig {
                app_key: "app-key".to_string(),
                host: "localhost".to_string(),
                port: 8080,
                scheme: BroadcastScheme::Http,
            },
            app: AppConfig {
                support_email: "support@example.com".to_string(),
                analytics_tag_id: None,
                error_reporting_dsn: None,
                session_path: PathBuf::from(".affiliate-session.json"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth_endpoint(), "http://localhost:9000/broadcasting/auth");
    }

    #[test]
    fn test_ws_url_follows_scheme() {
        let mut config = Config::default();
        assert!(config.ws_url().starts_with("ws://localhost:8080/app/app-key?protocol=7"));

        config.broadcast.scheme = BroadcastScheme::Https;
        config.broadcast.port = 443;
        assert!(config.ws_url().starts_with("wss://localhost:443/app/app-key?protocol=7"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "ftp://files.example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.broadcast.app_key.clear();
        assert!(config.validate().is_err());
    }
}
