// 会话存储
// 持久化登录令牌、用户信息与 "需要2FA" 标志

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 客户端会话
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer 令牌
    pub token: Option<String>,
    pub user: Option<User>,
    /// 后端要求完成2FA
    #[serde(default)]
    pub require_two_factor: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// 会话存储接口，注入到 API 客户端
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Session, SessionError>;
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;

    /// 仅读取令牌，读取失败视为未登录
    fn token(&self) -> Option<String> {
        self.load().ok().and_then(|session| session.token)
    }

    /// 设置 "需要2FA" 标志，保留其他字段
    fn set_require_two_factor(&self, required: bool) -> Result<(), SessionError> {
        let mut session = self.load()?;
        session.require_two_factor = required;
        self.save(&session)
    }
}

/// 基于 JSON 文件的会话存储
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// 内存会话存储
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// 仅带令牌的会话
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Session {
            token: Some(token.into()),
            ..Default::default()
        })
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session, SessionError> {
        Ok(self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Session::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 42,
            name: "Jane Doe".to_string(),
            username: "jane".to_string(),
            email: Some("jane@example.com".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_file_store_roundtrip_and_clear() {
        let path = std::env::temp_dir().join(format!("affiliate-session-{}.json", uuid::Uuid::new_v4()));
        let store = FileSessionStore::new(&path);

        assert_eq!(store.load().unwrap(), Session::default());

        let session = Session {
            token: Some("tok".into()),
            user: Some(sample_user()),
            require_two_factor: false,
        };
        store.save(&session).unwrap();
        assert!(store.load().unwrap().is_authenticated());

        store.set_require_two_factor(true).unwrap();
        let loaded = store.load().unwrap();
        assert!(loaded.require_two_factor);
        assert_eq!(loaded.token.as_deref(), Some("tok"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::with_token("abc");
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert!(!store.load().unwrap().is_authenticated());

        store.clear().unwrap();
        assert_eq!(store.token(), None);
    }
}
