//! 知识点多选组件
//!
//! 20 个固定知识点，点击切换选中状态。

use codetrackr_shared::Topic;
use leptos::prelude::*;

use super::form_state::FormState;

#[component]
pub fn TopicPicker(state: FormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">"Topics"</span>
                <span class="label-text-alt text-base-content/50">"Select at least one"</span>
            </label>
            <div class="flex flex-wrap gap-2">
                {Topic::ALL.into_iter().map(|topic| {
                    let selected = move || state.topics.with(|s| s.contains(topic));
                    view! {
                        <button
                            type="button"
                            class=move || if selected() { "btn btn-sm btn-primary" } else { "btn btn-sm btn-outline" }
                            aria-pressed=move || selected().to_string()
                            on:click=move |_| state.toggle_topic(topic)
                        >
                            {topic.as_str()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <Show when=move || state.topics.with(|s| !s.is_empty())>
                <p class="mt-2 text-sm text-base-content/70">
                    "Selected: " {move || state.topics.with(|s| s.joined())}
                </p>
            </Show>
        </div>
    }
}
