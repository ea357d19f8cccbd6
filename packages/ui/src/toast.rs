use std::time::Duration;

use dioxus::prelude::*;

use crate::platform::{now_ms, sleep};
use crate::Icon;
use crate::icons::{FaCircleCheck, FaCircleInfo, FaCircleXmark, FaXmark};

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// How long a toast stays on screen.
pub const TOAST_TTL_MS: f64 = 4000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast--success",
            ToastLevel::Error => "toast toast--error",
            ToastLevel::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: f64) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            level,
            message: message.into(),
            expires_at: now + TOAST_TTL_MS,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts. Returns whether anything was removed.
    pub fn prune(&mut self, now: f64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }
}

/// Handle for raising toasts from any component below [`ToastProvider`].
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    queue: Signal<ToastQueue>,
}

impl Toaster {
    fn push(&self, level: ToastLevel, message: impl Into<String>) {
        let mut queue = self.queue;
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::warn!("{}", message),
            _ => tracing::debug!("{}", message),
        }
        queue.write().push(level, message, now_ms());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }
}

pub fn use_toast() -> Toaster {
    use_context::<Toaster>()
}

/// Renders queued toasts in the corner and expires them.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut queue = use_signal(ToastQueue::default);
    use_context_provider(|| Toaster { queue });

    use_effect(move || {
        spawn(async move {
            loop {
                sleep(Duration::from_millis(500)).await;
                if queue.peek().toasts.is_empty() {
                    continue;
                }
                let now = now_ms();
                let expired = queue.peek().toasts.iter().any(|t| t.expires_at <= now);
                if expired {
                    queue.write().prune(now);
                }
            }
        });
    });

    rsx! {
        document::Stylesheet { href: TOAST_CSS }
        {children}
        div {
            class: "toast-stack",
            for toast in queue().toasts {
                div {
                    key: "{toast.id}",
                    class: toast.level.class(),
                    role: "status",
                    {level_icon(toast.level)}
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        title: "Tutup",
                        onclick: move |_| queue.write().dismiss(toast.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

fn level_icon(level: ToastLevel) -> Element {
    match level {
        ToastLevel::Success => rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
        ToastLevel::Error => rsx! { Icon { icon: FaCircleXmark, width: 16, height: 16 } },
        ToastLevel::Info => rsx! { Icon { icon: FaCircleInfo, width: 16, height: 16 } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastLevel::Success, "Tersimpan", 0.0);
        let b = queue.push(ToastLevel::Error, "Gagal", 0.0);
        assert!(b > a);
        queue.dismiss(a);
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].message, "Gagal");
    }

    #[test]
    fn test_prune_drops_only_expired() {
        let mut queue = ToastQueue::default();
        queue.push(ToastLevel::Info, "lama", 0.0);
        queue.push(ToastLevel::Info, "baru", 3000.0);
        assert!(!queue.prune(TOAST_TTL_MS - 1.0));
        assert!(queue.prune(TOAST_TTL_MS));
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].message, "baru");
    }
}
