//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 替代 `gloo-net`，提供简洁的 HTTP 客户端接口。
//! 上层通过 `HttpTransport` trait 发送请求，测试中替换为 `MockTransport`。

use codetrackr_shared::protocol::HttpMethod;
use std::collections::BTreeMap;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("failed to build request: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    NetworkError(String),
    /// 响应读取失败
    #[error("failed to read response: {0}")]
    ResponseParseFailed(String),
}

// =========================================================
// 传输层抽象 (Transport Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构 (已读取完整响应体)
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 传输 trait
///
/// (?Send) 是因为浏览器中的 JsFuture 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch
// =========================================================

/// 基于 `window.fetch` 的传输实现
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchTransport;

fn build_error(e: JsValue) -> HttpError {
    HttpError::RequestBuildFailed(format!("{:?}", e))
}

fn read_error(e: JsValue) -> HttpError {
    HttpError::ResponseParseFailed(format!("{:?}", e))
}

impl FetchTransport {
    fn to_web_request(req: &HttpRequest) -> Result<Request, HttpError> {
        let headers = Headers::new().map_err(build_error)?;
        for (key, value) in &req.headers {
            headers.set(key, value).map_err(build_error)?;
        }

        let init = RequestInit::new();
        init.set_method(req.method.as_str());
        init.set_headers(&headers.into());
        if let Some(body) = &req.body {
            init.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &init).map_err(build_error)
    }

    /// 读取完整响应体；非 2xx 也照常读取，交给上层解析 `detail`
    async fn read_body(response: &Response) -> Result<String, HttpError> {
        let text = JsFuture::from(response.text().map_err(read_error)?)
            .await
            .map_err(read_error)?;
        text.as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("body is not text".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let request = Self::to_web_request(&req)?;
        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("no window".to_string()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?
            .dyn_into()
            .map_err(read_error)?;

        let body = Self::read_body(&response).await?;
        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}

// =========================================================
// 测试工具: MockTransport
// =========================================================
