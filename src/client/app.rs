use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::client::{
    components::Toaster,
    config::Config,
    hooks::{use_auth_provider, use_toast_provider},
    router::Route,
    service::{api::ApiClient, EmailService},
};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const DAISYUI_CSS: &str = "https://cdn.jsdelivr.net/npm/daisyui@5";
const TAILWIND_JS: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

#[component]
pub fn App() -> Element {
    let config = use_context_provider(|| {
        Config::from_build_env().unwrap_or_else(|e| {
            tracing::error!("Invalid build configuration, using defaults: {}", e);
            Config::default()
        })
    });

    use_toast_provider(config.toast_duration);
    let auth = use_auth_provider(config);
    use_context_provider(|| EmailService::new(ApiClient::new(auth.session().clone())));

    rsx! {
        document::Stylesheet { href: DAISYUI_CSS }
        document::Script { src: TAILWIND_JS }
        document::Stylesheet { href: MAIN_CSS }
        Router::<Route> {}
        Toaster {}
    }
}
