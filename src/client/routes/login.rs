use dioxus::document::{Meta, Title};
use dioxus::prelude::*;

use crate::{
    client::{
        components::{auth::LoginForm, Page},
        hooks::{use_auth, use_toasts},
        router::Route,
    },
    model::auth::LoginCredentials,
};

#[component]
pub fn Login() -> Element {
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

    let on_submit = move |credentials: LoginCredentials| {
        let auth = auth.clone();
        spawn(async move {
            match auth.login(credentials).await {
                Ok(_) => toasts.success("Login successful!"),
                Err(e) => toasts.error(e.user_message()),
            }
        });
    };

    rsx!(
        Title { "Sign in | AIEmail" }
        Meta { name: "description", content: "Sign in to your AI-powered inbox." }
        Page { class: "flex items-center justify-center",
            div { class: "card shadow-sm w-full max-w-md bg-base-100",
                div { class: "card-body gap-4",
                    h1 { class: "card-title text-2xl", "Welcome back" }
                    p { class: "text-sm opacity-70", "Sign in to your account" }
                    LoginForm { on_submit, is_loading }
                }
            }
        }
    )
}
