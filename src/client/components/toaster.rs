use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaCircleCheck, FaCircleExclamation, FaXmark};
use dioxus_free_icons::Icon;

use crate::client::hooks::{toast::ToastKind, use_toasts};

#[component]
pub fn Toaster() -> Element {
    let toasts = use_toasts();
    let items = toasts.queue().read().toasts().to_vec();

    rsx!(
        div { class: "toast toast-top toast-end z-50",
            for toast in items {
                div {
                    key: "{toast.id}",
                    role: "status",
                    class: match toast.kind {
                        ToastKind::Success => "alert alert-success",
                        ToastKind::Error => "alert alert-error",
                    },
                    {match toast.kind {
                        ToastKind::Success => rsx!(Icon { width: 16, height: 16, icon: FaCircleCheck }),
                        ToastKind::Error => rsx!(Icon { width: 16, height: 16, icon: FaCircleExclamation }),
                    }}
                    span { "{toast.message}" }
                    button {
                        class: "btn btn-ghost btn-xs",
                        aria_label: "Dismiss notification",
                        onclick: move |_| toasts.dismiss(toast.id),
                        Icon { width: 12, height: 12, icon: FaXmark }
                    }
                }
            }
        }
    )
}
