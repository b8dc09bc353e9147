//! 全局通知 (toast)
//!
//! 页面之间共享，例如新增题目后跳回面板仍能看到成功提示。

use crate::config::TOAST_DURATION_SECS;
use leptos::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    current: RwSignal<Option<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Error);
    }

    fn show(&self, message: String, kind: ToastKind) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Toast { id, message, kind }));

        // 只清除自己这一条，避免旧定时器提前关掉新通知
        let current = self.current;
        set_timeout(
            move || {
                current.update(|t| {
                    if t.as_ref().is_some_and(|t| t.id == id) {
                        *t = None;
                    }
                })
            },
            Duration::from_secs(TOAST_DURATION_SECS),
        );
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().expect("Toasts should be provided")
}

/// 通知渲染出口，放在应用根部
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    move || {
        toasts.current.get().map(|toast| {
            let class = match toast.kind {
                ToastKind::Success => "alert alert-success shadow-lg",
                ToastKind::Error => "alert alert-error shadow-lg",
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{toast.message}</span>
                    </div>
                </div>
            }
        })
    }
}
