use crate::api::CodeTrackrApi;
use crate::auth::use_auth;
use crate::components::icons::ArrowLeft;
use crate::components::toast::use_toasts;
use crate::error::AppResult;
use crate::web::HttpTransport;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use codetrackr_shared::CreateProblemResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;

mod basic_info_form;
pub mod form_state;
mod topic_picker;

use basic_info_form::BasicInfoForm;
use form_state::{FormState, ProblemDraft};
use topic_picker::TopicPicker;

const ADD_FAILED: &str = "Failed to add problem";

/// 校验并提交新题目
///
/// 校验失败时直接返回，不会发出请求。
pub async fn submit_problem<T: HttpTransport>(
    api: &CodeTrackrApi<T>,
    draft: &ProblemDraft,
) -> AppResult<CreateProblemResponse> {
    let request = draft.validate()?;
    let created = api.add_problem(&request).await?;
    match created.problem() {
        Some(problem) => log::info!("problem added: {} ({})", problem.base.title, problem.id),
        None => log::info!("problem added: {}", request.title),
    }
    Ok(created)
}

#[component]
pub fn AddProblemPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toasts = use_toasts();

    let state = FormState::new();
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let draft = state.draft();
        // 先在本地校验，避免无意义的请求
        if let Err(e) = draft.validate() {
            let message = e.user_message(ADD_FAILED);
            set_error_msg.set(Some(message.clone()));
            toasts.error(message);
            return;
        }

        set_loading.set(true);
        set_error_msg.set(None);
        let api = auth.api();
        spawn_local(async move {
            match submit_problem(&api, &draft).await {
                Ok(_) => {
                    toasts.success("Problem added successfully!");
                    state.reset();
                    router.navigate_to(AppRoute::Dashboard);
                }
                Err(e) => {
                    // 保留表单内容以便重试
                    let message = e.user_message(ADD_FAILED);
                    set_error_msg.try_set(Some(message.clone()));
                    toasts.error(message);
                }
            }
            set_loading.try_set(false);
        });
    };

    let on_cancel = move |_| router.navigate_to(AppRoute::Dashboard);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-6">
                <button class="btn btn-ghost gap-2" on:click=on_cancel>
                    <ArrowLeft attr:class="h-4 w-4" /> "Back to Dashboard"
                </button>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title text-2xl">"Add New Problem"</h2>
                        <p class="text-base-content/70">"Track a problem you've solved."</p>

                        <form on:submit=on_submit class="space-y-4 mt-4">
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <BasicInfoForm state=state />
                            <TopicPicker state=state />

                            <div class="card-actions justify-end pt-4">
                                <button type="button" class="btn btn-ghost" on:click=on_cancel>"Cancel"</button>
                                <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                                    {move || if loading.get() {
                                        view! { <span class="loading loading-spinner"></span> "Adding..." }.into_any()
                                    } else {
                                        "Add Problem".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests;
