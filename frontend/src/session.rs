//! 会话存储
//!
//! 持有当前 token 与用户资料，并同步到持久化存储，
//! 刷新页面后可以恢复登录状态。

use crate::config::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
use codetrackr_shared::User;

/// 持久化键值存储抽象
///
/// 浏览器中由 `web::LocalStorage` 实现，测试中使用内存实现。
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 已认证的会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// 会话存储
///
/// 内存中的 `current` 与持久化存储中的两个键总是一起写入、一起清除。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// 创建存储并立即从持久化存储恢复会话
    pub fn restored(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.current = store.restore();
        store
    }

    /// 读取持久化的会话
    ///
    /// 任一键缺失或用户资料无法解析时返回 `None`，不修改任何状态。
    pub fn restore(&self) -> Option<Session> {
        let token = self.storage.get(STORAGE_TOKEN_KEY)?;
        let raw_user = self.storage.get(STORAGE_USER_KEY)?;
        if token.is_empty() {
            return None;
        }
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                log::warn!("stored user profile is unreadable, treating as logged out: {}", e);
                None
            }
        }
    }

    /// 写入 token 与用户资料
    pub fn save(&mut self, token: String, user: User) {
        let ok = match serde_json::to_string(&user) {
            Ok(raw_user) => {
                self.storage.set(STORAGE_TOKEN_KEY, &token)
                    && self.storage.set(STORAGE_USER_KEY, &raw_user)
            }
            Err(_) => false,
        };
        if !ok {
            log::warn!("failed to persist session for {}", user.username);
        }
        self.current = Some(Session { token, user });
    }

    /// 清除持久化的键与内存中的会话
    pub fn clear(&mut self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_USER_KEY);
        self.current = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

// =========================================================
// 测试工具: MemoryStorage
// =========================================================
