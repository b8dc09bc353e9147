//! 基础信息表单组件
//!
//! 负责题目名称、平台、难度和完成日期的 UI 渲染。
//! 纯粹的表单输入渲染，职责单一。

use codetrackr_shared::{Difficulty, Platform};
use leptos::prelude::*;

use super::form_state::FormState;

/// 基础信息表单组件
#[component]
pub fn BasicInfoForm(state: FormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for="title" class="label">
                <span class="label-text">"Problem Title"</span>
            </label>
            <input id="title" required
                type="text"
                placeholder="Two Sum"
                on:input=move |ev| state.title.set(event_target_value(&ev))
                prop:value=move || state.title.get()
                class="input input-bordered w-full"
            />
        </div>

        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <div class="form-control">
                <label for="platform" class="label">
                    <span class="label-text">"Platform"</span>
                </label>
                <select
                    id="platform"
                    class="select select-bordered w-full"
                    on:change=move |ev| {
                        if let Ok(platform) = event_target_value(&ev).parse::<Platform>() {
                            state.platform.set(platform);
                        }
                    }
                >
                    {Platform::ALL.into_iter().map(|p| view! {
                        <option value=p.as_str() selected=move || state.platform.get() == p>
                            {p.as_str()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            <div class="form-control">
                <label for="difficulty" class="label">
                    <span class="label-text">"Difficulty"</span>
                </label>
                <select
                    id="difficulty"
                    class="select select-bordered w-full"
                    on:change=move |ev| {
                        if let Ok(difficulty) = event_target_value(&ev).parse::<Difficulty>() {
                            state.difficulty.set(difficulty);
                        }
                    }
                >
                    {Difficulty::ALL.into_iter().map(|d| view! {
                        <option value=d.as_str() selected=move || state.difficulty.get() == d>
                            {d.as_str()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            <div class="form-control">
                <label for="date_completed" class="label">
                    <span class="label-text">"Date Completed"</span>
                </label>
                <input id="date_completed" required
                    type="date"
                    on:input=move |ev| state.date.set(event_target_value(&ev))
                    prop:value=move || state.date.get()
                    class="input input-bordered w-full"
                />
            </div>
        </div>
    }
}
