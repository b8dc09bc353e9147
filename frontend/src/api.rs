//! 后端 API 客户端
//!
//! 所有请求都经过 `dispatch`：会话中有 token 时统一附加
//! `Authorization: Bearer <token>`，非 2xx 响应转换为 `AppError`。

use crate::error::{AppError, AppResult};
use crate::web::{FetchTransport, HttpRequest, HttpResponse, HttpTransport};
use codetrackr_shared::protocol::{
    ApiRequest, GetStatsRequest, ListProblemsRequest, LoginRequest, RegisterRequest,
    SeedDataRequest,
};
use codetrackr_shared::{
    AuthResponse, CreateProblemRequest, CreateProblemResponse, Credentials, ErrorDetail,
    HEADER_AUTHORIZATION, Problem, SeedResponse, Stats,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CodeTrackrApi<T = FetchTransport> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl CodeTrackrApi<FetchTransport> {
    /// 使用浏览器 fetch 的客户端
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_transport(base_url, token, FetchTransport)
    }
}

impl<T: HttpTransport> CodeTrackrApi<T> {
    pub fn with_transport(base_url: impl Into<String>, token: Option<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            transport,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 构建请求：附加 JSON 请求体与认证头
    fn build<R: ApiRequest>(&self, req: &R) -> AppResult<HttpRequest> {
        let mut http = HttpRequest::new(self.url(R::PATH), R::METHOD)
            .with_header("Accept", "application/json");

        if R::HAS_BODY {
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(serde_json::to_string(req)?);
        }

        match self.token.as_deref() {
            Some(token) => {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
            None if R::REQUIRES_AUTH => {
                log::warn!("{} {} sent without a session token", R::METHOD.as_str(), R::PATH);
            }
            None => {}
        }

        Ok(http)
    }

    /// 发送请求并检查状态码，返回原始的 2xx 响应
    async fn dispatch<R: ApiRequest>(&self, req: &R) -> AppResult<HttpResponse> {
        let http = self.build(req)?;
        let res = self.transport.send(http).await.map_err(|e| {
            log::error!("{} {} failed: {}", R::METHOD.as_str(), R::PATH, e);
            AppError::from(e)
        })?;

        if !res.ok() {
            let err = error_from_response(&res);
            log::warn!("{} {} -> {}: {}", R::METHOD.as_str(), R::PATH, res.status, err);
            return Err(err);
        }
        Ok(res)
    }

    /// 发送一个类型化请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> AppResult<R::Response> {
        let res = self.dispatch(req).await?;
        serde_json::from_str::<R::Response>(&res.body).map_err(AppError::from)
    }

    /// 登录
    pub async fn login(&self, credentials: Credentials) -> AppResult<AuthResponse> {
        self.send(&LoginRequest(credentials)).await
    }

    /// 注册
    pub async fn register(&self, credentials: Credentials) -> AppResult<AuthResponse> {
        self.send(&RegisterRequest(credentials)).await
    }

    /// 获取题目列表 (后端顺序)
    pub async fn get_problems(&self) -> AppResult<Vec<Problem>> {
        self.send(&ListProblemsRequest).await
    }

    /// 获取统计
    pub async fn get_stats(&self) -> AppResult<Stats> {
        self.send(&GetStatsRequest).await
    }

    /// 新增题目
    ///
    /// 2xx 即视为已保存；响应体无法识别时按 `Empty` 处理，避免重复提交。
    pub async fn add_problem(
        &self,
        problem: &CreateProblemRequest,
    ) -> AppResult<CreateProblemResponse> {
        let res = self.dispatch(problem).await?;
        Ok(serde_json::from_str(&res.body).unwrap_or_else(|e| {
            log::warn!("POST {} accepted with an unrecognized body: {}", <CreateProblemRequest as ApiRequest>::PATH, e);
            CreateProblemResponse::Empty
        }))
    }

    /// 写入示例数据
    pub async fn seed_data(&self) -> AppResult<SeedResponse> {
        self.send(&SeedDataRequest).await
    }
}

/// 非 2xx 响应：优先取 `{ "detail": ... }`
fn error_from_response(res: &HttpResponse) -> AppError {
    match serde_json::from_str::<ErrorDetail>(&res.body) {
        Ok(ErrorDetail { detail }) if !detail.is_empty() => AppError::Backend {
            status: res.status,
            detail,
        },
        _ => AppError::Status { status: res.status },
    }
}
