use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::components::toast::use_toasts;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use codetrackr_shared::Difficulty;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub mod view_model;

use view_model::{DashboardData, DashboardView, LoadTracker, TopicBadges, load_dashboard};

const LOAD_FAILED: &str = "Failed to load data";
const SEED_FAILED: &str = "Failed to load sample data";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toasts = use_toasts();

    // None 表示尚未成功加载过；只在两个请求都成功时整体替换
    let (data, set_data) = signal(Option::<DashboardData>::None);
    // 挂载后立即开始首次加载
    let (loading, set_loading) = signal(true);
    let (seeding, set_seeding) = signal(false);
    let tracker = StoredValue::new(LoadTracker::default());

    let load = move || {
        // 页面已卸载时 tracker 不可用
        let Some(ticket) = tracker.try_update_value(|t| t.begin()) else {
            return;
        };
        let api = auth.api();
        set_loading.try_set(true);
        spawn_local(async move {
            let result = load_dashboard(&api).await;
            // 页面已卸载或已有更新的加载
            if !tracker.try_with_value(|t| t.is_current(ticket)).unwrap_or(false) {
                log::debug!("discarding stale dashboard response");
                return;
            }
            match result {
                Ok(loaded) => {
                    set_data.try_set(Some(loaded));
                }
                Err(e) => {
                    log::error!("dashboard load failed: {}", e);
                    toasts.error(LOAD_FAILED);
                }
            }
            set_loading.try_set(false);
        });
    };

    // 初次挂载时加载
    Effect::new(move |_| load());
    let retry = Callback::new(move |()| load());

    // busy 标记防止请求进行中重复点击
    let seed_demo_data = Callback::new(move |()| {
        if seeding.get_untracked() {
            return;
        }
        set_seeding.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.seed_data().await {
                Ok(resp) => {
                    toasts.success(resp.message);
                    load();
                }
                Err(e) => toasts.error(e.user_message(SEED_FAILED)),
            }
            set_seeding.try_set(false);
        });
    });

    let on_logout = move |_| {
        let next = logout(&auth, AppRoute::Dashboard);
        router.navigate_to(next);
    };

    let user = auth.user();
    let username = move || user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    // 只在视图种类变化时重建；已加载时的数据变化由 Populated 分支自身追踪
    let view_kind = Memo::new(move |_| data.with(|d| DashboardView::of(d.as_ref(), loading.get())));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <CodeBracket attr:class="text-primary h-6 w-6" />
                        <a class="btn btn-ghost text-xl">"CodeTrackr"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            "Signed in as " {username}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <Link to=AppRoute::AddProblem class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" /> "Add Problem"
                        </Link>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </div>
                </div>

                {move || match view_kind.get() {
                    DashboardView::Loading => view! {
                        <div class="flex justify-center py-24">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }.into_any(),
                    DashboardView::Failed => view! {
                        <LoadFailed on_retry=retry />
                    }.into_any(),
                    DashboardView::Empty => view! {
                        <EmptyState seeding=seeding on_seed=seed_demo_data />
                    }.into_any(),
                    DashboardView::Populated => {
                        let snapshot = data.get().unwrap_or_default();
                        view! { <DashboardContent data=snapshot loading=loading /> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

/// 首次加载失败
#[component]
fn LoadFailed(#[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body items-center text-center py-16">
                <h2 class="card-title text-error">"Failed to load data"</h2>
                <p class="text-base-content/70">"Check your connection and try again."</p>
                <div class="card-actions mt-4">
                    <button class="btn btn-primary" on:click=move |_| on_retry.run(())>"Retry"</button>
                </div>
            </div>
        </div>
    }
}

/// 没有题目时的引导
#[component]
fn EmptyState(seeding: ReadSignal<bool>, #[prop(into)] on_seed: Callback<()>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body items-center text-center py-16">
                <Target attr:class="h-12 w-12 text-primary opacity-60" />
                <h2 class="card-title">"No problems tracked yet"</h2>
                <p class="text-base-content/70">"Start by adding your first solved problem, or load some sample data to explore."</p>
                <div class="card-actions mt-4">
                    <Link to=AppRoute::AddProblem class="btn btn-primary gap-2">
                        <Plus attr:class="h-4 w-4" /> "Add First Problem"
                    </Link>
                    <button class="btn btn-outline gap-2" on:click=move |_| on_seed.run(()) disabled=move || seeding.get()>
                        <Database attr:class="h-4 w-4" />
                        {move || if seeding.get() { "Loading..." } else { "Load Sample Data" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// 统计卡片、柱状图、知识点完成度与最近题目
#[component]
fn DashboardContent(data: DashboardData, loading: ReadSignal<bool>) -> impl IntoView {
    let max_count = data.chart_max_count();
    let chart = data.chart_topics().to_vec();
    let topic_list = chart.clone();
    let recent = data.recent_problems().to_vec();

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-figure text-primary"><Trophy attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Total Solved"</div>
                <div class="stat-value text-primary">{data.stats.total_solved}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-warning"><Flame attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Current Streak"</div>
                <div class="stat-value text-warning">{data.stats.current_streak}</div>
                <div class="stat-desc">"days"</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-secondary"><Target attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Topics Covered"</div>
                <div class="stat-value text-secondary">{data.topics_covered()}</div>
                <div class="stat-desc">{move || if loading.get() { "Refreshing..." } else { "" }}</div>
            </div>
        </div>

        <div class="grid gap-8 md:grid-cols-2">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Problems by Topic"</h3>
                    <div class="flex items-end gap-3 h-56 pt-4">
                        {chart.into_iter().map(|t| {
                            let height = format!("height: {}%", t.count * 100 / max_count);
                            view! {
                                <div class="flex flex-col items-center justify-end flex-1 h-full gap-1">
                                    <span class="text-xs font-bold">{t.count}</span>
                                    <div class="w-full bg-primary rounded-t" style=height></div>
                                    <span class="text-xs text-base-content/70 truncate w-full text-center">{t.topic}</span>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Topic Completion"</h3>
                    <div class="space-y-3">
                        {topic_list.into_iter().map(|t| view! {
                            <div>
                                <div class="flex justify-between text-sm">
                                    <span class="font-medium">{t.topic}</span>
                                    <span class="text-base-content/70">{format!("{} ({:.1}%)", t.count, t.percentage)}</span>
                                </div>
                                <progress class="progress progress-primary w-full" value=t.percentage max="100"></progress>
                            </div>
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="p-6 pb-2">
                    <h3 class="card-title">"Recent Problems"</h3>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Platform"</th>
                                <th>"Difficulty"</th>
                                <th class="hidden md:table-cell">"Topics"</th>
                                <th>"Date"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {recent.into_iter().map(|problem| {
                                let badges = TopicBadges::of(&problem.base.topics);
                                let difficulty_class = match problem.base.difficulty {
                                    Difficulty::Easy => "badge badge-success",
                                    Difficulty::Medium => "badge badge-warning",
                                    Difficulty::Hard => "badge badge-error",
                                };
                                view! {
                                    <tr>
                                        <td class="font-medium">{problem.base.title}</td>
                                        <td>{problem.base.platform.as_str()}</td>
                                        <td><span class=difficulty_class>{problem.base.difficulty.as_str()}</span></td>
                                        <td class="hidden md:table-cell">
                                            <div class="flex flex-wrap gap-1">
                                                {badges.labels().into_iter().map(|label| view! {
                                                    <span class="badge badge-outline badge-sm">{label}</span>
                                                }).collect_view()}
                                            </div>
                                        </td>
                                        <td class="font-mono text-sm">{problem.base.date_completed.to_string()}</td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
