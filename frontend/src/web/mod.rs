//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::{FetchTransport, HttpError, HttpRequest, HttpResponse, HttpTransport};
pub use storage::LocalStorage;

#[cfg(test)]
pub(crate) use http::mock::MockTransport;
