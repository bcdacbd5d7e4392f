use dioxus::prelude::*;

use crate::client::{hooks::use_auth, router::Route};

/// Renders the nested route only for signed in users, everyone else is sent to the login page
#[component]
pub fn AuthLayout() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    let authenticated = auth.is_authenticated();

    use_effect(move || {
        if !auth.is_authenticated() {
            navigator.replace(Route::Login {});
        }
    });

    if !authenticated {
        return rsx!(
            div { class: "min-h-screen flex items-center justify-center",
                span { class: "loading loading-spinner loading-lg" }
            }
        );
    }

    rsx!(Outlet::<Route> {})
}
