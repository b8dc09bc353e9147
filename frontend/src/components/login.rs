use crate::auth::{AuthMode, login, use_auth};
use crate::components::icons::CodeBracket;
use crate::components::toast::use_toasts;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let (mode, set_mode) = signal(AuthMode::Login);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let is_loading = move || auth.state.with(|s| s.is_loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let current_mode = mode.get_untracked();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match login(&auth, current_mode, user, pass).await {
                Ok(()) => {
                    let greeting = match current_mode {
                        AuthMode::Login => "Welcome back!",
                        AuthMode::Register => "Account created successfully!",
                    };
                    toasts.success(greeting);
                }
                Err(e) => {
                    let message = e.user_message(current_mode.failure_message());
                    // 页面可能已被卸载
                    set_error_msg.try_set(Some(message.clone()));
                    toasts.error(message);
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    let on_toggle = move |_| {
        set_mode.update(|m| *m = m.toggle());
        set_error_msg.set(None);
    };

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            <div class="hero min-h-screen bg-base-200">
                <div class="hero-content flex-col w-full max-w-md">
                    <div class="text-center mb-4">
                        <div class="flex flex-col items-center gap-2">
                            <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                <CodeBracket attr:class="h-8 w-8" />
                            </div>
                            <h1 class="text-3xl font-bold">"CodeTrackr"</h1>
                            <p class="text-base-content/70">
                                {move || mode.get().heading()}
                            </p>
                        </div>
                    </div>

                    <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                        <form class="card-body" on:submit=on_submit>
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label" for="username">
                                    <span class="label-text">"Username"</span>
                                </label>
                                <input
                                    id="username"
                                    type="text"
                                    autocomplete="username"
                                    placeholder="Enter your username"
                                    on:input=move |ev| set_username.set(event_target_value(&ev))
                                    prop:value=username
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any()
                                    } else {
                                        mode.get().submit_label().into_any()
                                    }}
                                </button>
                            </div>
                            <button type="button" class="btn btn-link btn-sm" on:click=on_toggle>
                                {move || mode.get().switch_prompt()}
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </Show>
    }
}
