//! 运行时配置
//!
//! 后端地址在编译期通过 `CODETRACKR_BACKEND_URL` 注入，
//! 未设置时浏览器中使用当前页面的 origin。

use codetrackr_shared::API_PREFIX;

const BACKEND_URL_ENV: Option<&str> = option_env!("CODETRACKR_BACKEND_URL");
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// LocalStorage 中保存 token 的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// LocalStorage 中保存用户资料 (JSON) 的键
pub const STORAGE_USER_KEY: &str = "user";
/// 通知自动消失的时间
pub const TOAST_DURATION_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端 origin，不含结尾的 `/`
    pub backend_url: String,
}

impl AppConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        Self { backend_url }
    }

    /// 按 编译期变量 -> 页面 origin -> 默认值 的顺序解析
    pub fn resolve() -> Self {
        let url = BACKEND_URL_ENV
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .or_else(page_origin)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self::new(url)
    }

    /// API 根路径: `<origin>/api`
    pub fn api_base(&self) -> String {
        format!("{}{}", self.backend_url, API_PREFIX)
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}
