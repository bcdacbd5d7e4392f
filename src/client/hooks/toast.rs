use chrono::Duration;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::client::util::time::sleep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Notifications currently on screen, oldest first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

/// Waits out `duration`, then removes toast `id` through `dismiss`
pub async fn dismiss_after(id: u64, duration: Duration, dismiss: impl FnOnce(u64)) {
    sleep(duration).await;
    dismiss(id);
}

/// Handle to the shared toast queue, provided as context by the app root
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
    duration: Duration,
}

impl Toasts {
    pub fn queue(&self) -> Signal<ToastQueue> {
        self.queue
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    fn show(&self, kind: ToastKind, message: String) {
        let mut queue = self.queue;
        let id = queue.write().push(kind, message);

        // Outlives the calling component, which may unmount right after showing the toast
        spawn_forever(dismiss_after(id, self.duration, move |id| {
            queue.write().dismiss(id)
        }));
    }
}

pub fn use_toast_provider(duration: Duration) -> Toasts {
    use_context_provider(|| Toasts {
        queue: Signal::new(ToastQueue::default()),
        duration,
    })
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}
