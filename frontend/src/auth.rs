//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::api::CodeTrackrApi;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::session::{SessionStorage, SessionStore};
use crate::web::route::AppRoute;
use crate::web::{HttpTransport, LocalStorage};
use codetrackr_shared::{AuthResponse, Credentials, User};
use leptos::prelude::*;

// =========================================================
// 登录 / 注册模式
// =========================================================

/// 认证页的两种模式，可互相切换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back",
            AuthMode::Register => "Create your account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Register => "Sign Up",
        }
    }

    pub fn switch_prompt(&self) -> &'static str {
        match self {
            AuthMode::Login => "Don't have an account? Sign up",
            AuthMode::Register => "Already have an account? Sign in",
        }
    }

    /// 失败且后端未给出原因时的提示
    pub fn failure_message(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login failed",
            AuthMode::Register => "Registration failed",
        }
    }
}

// =========================================================
// 认证流程 (与 UI 无关，可在测试中直接驱动)
// =========================================================

/// 校验表单输入
///
/// 用户名与密码均不能为空（仅含空白视为空），此外不做任何校验；
/// 通过后按原样提交。
pub fn validate_credentials(username: &str, password: &str) -> AppResult<Credentials> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::validation("Please fill in all fields"));
    }
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// 按模式调用 `/auth/login` 或 `/auth/register`
///
/// 校验失败时不会发出任何请求。
pub async fn authenticate<T: HttpTransport>(
    api: &CodeTrackrApi<T>,
    mode: AuthMode,
    username: &str,
    password: &str,
) -> AppResult<AuthResponse> {
    let credentials = validate_credentials(username, password)?;
    match mode {
        AuthMode::Login => api.login(credentials).await,
        AuthMode::Register => api.register(credentials).await,
    }
}

/// 清除会话，返回从 `current` 注销后应展示的路由
pub fn end_session<S: SessionStorage>(store: &mut SessionStore<S>, current: AppRoute) -> AppRoute {
    if let Some(user) = store.user() {
        log::info!("logging out {}", user.username);
    }
    store.clear();
    current.guard(store.is_authenticated())
}

/// 将认证响应写入会话存储
pub fn establish_session<S: SessionStorage>(store: &mut SessionStore<S>, resp: AuthResponse) {
    log::info!("session established for {}", resp.user.username);
    store.save(resp.access_token, resp.user);
}

// =========================================================
// Leptos 上下文
// =========================================================

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 当前会话（内存 + LocalStorage）
    pub session: SessionStore<LocalStorage>,
    /// 后端配置
    pub config: AppConfig,
    /// 是否正在从存储恢复
    pub is_loading: bool,
}

impl AuthState {
    fn new(config: AppConfig) -> Self {
        Self {
            session: SessionStore::new(LocalStorage),
            config,
            is_loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// 按当前会话构造 API 客户端，有 token 时自动附加
    pub fn api(&self) -> CodeTrackrApi {
        CodeTrackrApi::new(
            self.config.api_base(),
            self.session.token().map(str::to_string),
        )
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new(config: AppConfig) -> Self {
        let (state, set_state) = signal(AuthState::new(config));
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    /// 当前用户（未登录时为 None）
    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.user().cloned()))
    }

    /// 当前会话对应的 API 客户端（不追踪依赖）
    pub fn api(&self) -> CodeTrackrApi {
        self.state.with_untracked(|s| s.api())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 恢复 token 与用户资料，缺任一项则视为未登录。
pub fn init_auth(ctx: &AuthContext) {
    ctx.set_state.update(|state| {
        state.session = SessionStore::restored(LocalStorage);
        state.is_loading = false;
        match state.session.user() {
            Some(user) => log::info!("restored session for {}", user.username),
            None => log::debug!("no stored session"),
        }
    });
}

/// 登录或注册，成功后写入会话
///
/// 路由服务监听认证状态，会自动从登录页跳转到面板。
pub async fn login(ctx: &AuthContext, mode: AuthMode, username: String, password: String) -> AppResult<()> {
    let api = ctx.api();
    let resp = authenticate(&api, mode, &username, &password).await?;
    ctx.set_state.update(|state| establish_session(&mut state.session, resp));
    Ok(())
}

/// 注销并清除状态，返回调用方应跳转到的路由
pub fn logout(ctx: &AuthContext, current: AppRoute) -> AppRoute {
    let mut next = AppRoute::auth_failure_redirect();
    ctx.set_state.update(|state| next = end_session(&mut state.session, current));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::memory::MemoryStorage;
    use crate::web::MockTransport;
    use codetrackr_shared::protocol::HttpMethod;
    use serde_json::json;

    const BASE: &str = "http://backend.test/api";

    fn anonymous_api() -> CodeTrackrApi<MockTransport> {
        CodeTrackrApi::with_transport(BASE, None, MockTransport::new())
    }

    #[test]
    fn mode_toggles_back_and_forth() {
        assert_eq!(AuthMode::Login.toggle(), AuthMode::Register);
        assert_eq!(AuthMode::Login.toggle().toggle(), AuthMode::Login);
    }

    #[test]
    fn empty_fields_fail_validation() {
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("   ", "pw").is_err());
        assert!(validate_credentials("alice", "").is_err());
    }

    #[tokio::test]
    async fn username_is_sent_exactly_as_typed() {
        let api = anonymous_api();
        api.transport().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/register", BASE),
            200,
            json!({ "access_token": "t2", "user": { "username": " alice " } }),
        );

        authenticate(&api, AuthMode::Register, " alice ", "pw").await.unwrap();

        let requests = api.transport().requests.borrow();
        let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "username": " alice ", "password": "pw" }));
    }

    #[tokio::test]
    async fn validation_failure_skips_network() {
        let api = anonymous_api();
        let err = authenticate(&api, AuthMode::Login, "alice", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn registering_stores_token_and_unlocks_dashboard() {
        let api = anonymous_api();
        api.transport().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/register", BASE),
            200,
            json!({ "access_token": "t1", "user": { "username": "alice" } }),
        );

        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        assert_eq!(AppRoute::Dashboard.guard(store.is_authenticated()), AppRoute::Login);

        let resp = authenticate(&api, AuthMode::Register, "alice", "secret123")
            .await
            .unwrap();
        establish_session(&mut store, resp);

        assert_eq!(storage.value("token").as_deref(), Some("t1"));
        assert_eq!(store.user().map(|u| u.username.as_str()), Some("alice"));
        assert_eq!(AppRoute::Dashboard.guard(store.is_authenticated()), AppRoute::Dashboard);
        assert_eq!(AppRoute::Login.guard(store.is_authenticated()), AppRoute::Dashboard);
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let api = anonymous_api();
        api.transport().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/login", BASE),
            401,
            json!({ "detail": "Incorrect username or password" }),
        );

        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.save("old".into(), User::new("alice"));

        let err = authenticate(&api, AuthMode::Login, "alice", "wrong")
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message(AuthMode::Login.failure_message()),
            "Incorrect username or password"
        );
        assert_eq!(store.token(), Some("old"));
        assert_eq!(storage.value("token").as_deref(), Some("old"));
    }

    #[test]
    fn ending_session_sends_protected_pages_to_login() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.save("t1".into(), User::new("alice"));

        let next = end_session(&mut store, AppRoute::Dashboard);

        assert_eq!(next, AppRoute::Login);
        assert!(store.current().is_none());
        assert!(storage.value("token").is_none());
        assert!(storage.value("user").is_none());
        for route in [AppRoute::Dashboard, AppRoute::AddProblem] {
            assert_eq!(route.guard(store.is_authenticated()), AppRoute::Login);
        }
    }
}
