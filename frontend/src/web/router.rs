//! 路由服务
//!
//! 基于 History API 的单页路由。所有对 `window.history` 的读写都在此模块，
//! 每一次路由变化（首次加载、站内跳转、前进后退、登录状态变化）
//! 都先经过 `AppRoute::guard` 再生效。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 写入浏览器历史的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    /// 新增一条记录（用户主动跳转）
    Push,
    /// 覆盖当前记录（守卫重定向）
    Replace,
    /// 地址栏已经是目标路径（popstate）
    Keep,
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let written = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Keep => return,
    };
    if written.is_err() {
        log::warn!("history update to {} failed", path);
    }
}

/// 路由服务
///
/// 认证状态以 `Signal<bool>` 注入，路由本身不依赖认证模块。
#[derive(Clone, Copy)]
pub struct RouterService {
    route: RwSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let service = Self {
            route: RwSignal::new(AppRoute::NotFound),
            is_authenticated,
        };
        // 首次加载同样经过守卫：未登录打开 `/` 会落到 `/login`
        service.apply(AppRoute::from_path(&location_path()), HistoryMode::Keep);
        service
    }

    pub fn current_route(&self) -> Signal<AppRoute> {
        self.route.into()
    }

    /// 跳转到站内路由
    pub fn navigate_to(&self, route: AppRoute) {
        self.apply(route, HistoryMode::Push);
    }

    /// 守卫后写入历史与当前路由
    ///
    /// 被守卫改写时，用 replaceState 覆盖，避免后退回到不可达的页面。
    fn apply(&self, requested: AppRoute, mode: HistoryMode) {
        let is_auth = self.is_authenticated.get_untracked();
        let resolved = requested.guard(is_auth);

        let mode = if resolved == requested {
            mode
        } else {
            log::info!("{} unavailable (authenticated: {}), showing {}", requested, is_auth, resolved);
            match mode {
                HistoryMode::Push => HistoryMode::Push,
                _ => HistoryMode::Replace,
            }
        };

        write_history(resolved.to_path(), mode);
        self.route.try_set(resolved);
    }

    /// 浏览器前进/后退
    fn listen_popstate(self) {
        let on_popstate = Closure::<dyn Fn()>::new(move || {
            self.apply(AppRoute::from_path(&location_path()), HistoryMode::Keep);
        });

        if let Some(window) = web_sys::window() {
            if window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("popstate listener could not be registered");
            }
        }

        // 监听器与页面同生命周期
        on_popstate.forget();
    }

    /// 登录/注销后重新守卫当前路由
    fn follow_auth_changes(self) {
        Effect::new(move |_| {
            let is_auth = self.is_authenticated.get();
            let route = self.route.get_untracked();
            if route.guard(is_auth) != route {
                log::debug!("auth changed (authenticated: {}), re-routing from {}", is_auth, route);
                self.apply(route, HistoryMode::Push);
            }
        });
    }
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>().expect("RouterService should be provided by <Router>")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由根组件，提供 `RouterService`
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    let router = RouterService::new(is_authenticated);
    router.listen_popstate();
    router.follow_auth_changes();
    provide_context(router);

    children()
}

/// 渲染当前路由对应的页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let route = use_router().current_route();
    move || matcher(route.get())
}

/// 站内链接
///
/// 拦截点击，交给路由服务处理而不是整页跳转。
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    view! {
        <a
            href=to.to_path()
            class=class
            on:click=move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                router.navigate_to(to);
            }
        >
            {children()}
        </a>
    }
}
