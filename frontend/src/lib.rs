//! CodeTrackr 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::route`: 路由定义与守卫
//! - `web::router`: 路由服务
//! - `auth` / `session`: 认证状态与会话持久化
//! - `api`: 后端 REST 客户端
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod web;

pub mod components {
    pub mod add_problem;
    pub mod dashboard;
    mod icons;
    pub mod login;
    pub mod toast;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::add_problem::AddProblemPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::toast::{ToastHost, provide_toasts};
use crate::config::AppConfig;
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};

use leptos::prelude::*;

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::AddProblem => view! { <AddProblemPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to=AppRoute::Dashboard class="btn btn-primary">"Go to Dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 认证上下文
    let config = AppConfig::resolve();
    log::info!("using backend api at {}", config.api_base());
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 2. 从 LocalStorage 恢复会话，必须早于路由守卫
    init_auth(&auth_ctx);

    // 3. 全局通知
    provide_toasts();

    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
