use dioxus::prelude::*;

use crate::client::{
    components::auth::AuthLayout,
    routes::{callback::CallbackQuery, AuthCallback, Inbox, Login, NotFound, Register},
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::Inbox {})]

    #[route("/login")]
    Login {},

    #[route("/register")]
    Register {},

    #[route("/auth/callback?:..query")]
    AuthCallback { query: CallbackQuery },

    #[layout(AuthLayout)]

        #[route("/inbox")]
        Inbox {},

    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
