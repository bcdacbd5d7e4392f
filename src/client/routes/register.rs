use dioxus::document::{Meta, Title};
use dioxus::prelude::*;

use crate::{
    client::{
        components::{auth::RegisterForm, Page},
        hooks::{use_auth, use_toasts},
        router::Route,
    },
    model::auth::RegisterCredentials,
};

#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigator = use_navigator();

    use_effect({
        let auth = auth.clone();
        move || {
            if auth.is_authenticated() {
                navigator.replace(Route::Inbox {});
            }
        }
    });

    let is_loading = auth.is_loading();

    let on_submit = move |credentials: RegisterCredentials| {
        let auth = auth.clone();
        spawn(async move {
            match auth.register(credentials).await {
                Ok(_) => toasts.success("Account created successfully!"),
                Err(e) => toasts.error(e.user_message()),
            }
        });
    };

    rsx!(
        Title { "Create account | AIEmail" }
        Meta { name: "description", content: "Create an account for your AI-powered inbox." }
        Page { class: "flex items-center justify-center",
            div { class: "card shadow-sm w-full max-w-md bg-base-100",
                div { class: "card-body gap-4",
                    h1 { class: "card-title text-2xl", "Create an account" }
                    p { class: "text-sm opacity-70", "Get started with AIEmail" }
                    RegisterForm { on_submit, is_loading }
                }
            }
        }
    )
}
