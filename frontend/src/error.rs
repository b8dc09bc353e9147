//! 前端错误类型
//!
//! 三类错误：
//! - 校验错误：发请求之前就被拦截
//! - 后端错误：响应体携带 `detail`，原样展示
//! - 传输错误：网络失败 / 无法解析，展示通用提示

use crate::web::HttpError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// 本地校验失败，未发出任何请求
    #[error("{0}")]
    Validation(String),

    /// 后端返回非 2xx 且带有 `detail`
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// 后端返回非 2xx，但响应体没有可用信息
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// 网络层失败
    #[error("network error: {0}")]
    Transport(String),

    /// 响应体无法解析为预期类型
    #[error("invalid response: {0}")]
    Decode(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 面向用户的提示文案
    ///
    /// 校验信息和后端 `detail` 原样返回，其余情况使用调用方给出的通用文案。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Backend { detail, .. } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP 状态码 (仅后端错误有)
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Backend { status, .. } | AppError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for AppError {
    fn from(e: HttpError) -> Self {
        AppError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
