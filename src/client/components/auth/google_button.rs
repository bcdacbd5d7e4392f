use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_brands_icons::FaGoogle;
use dioxus_free_icons::Icon;

use crate::client::{config::Config, service::auth::google_auth_url};

/// Starts the Google sign-in redirect chain
#[component]
pub fn GoogleAuthButton(disabled: bool) -> Element {
    let config = use_context::<Config>();
    let href = (!disabled).then(|| google_auth_url(&config, None));

    rsx!(
        a { href: href,
            button {
                r#type: "button",
                class: "btn btn-outline w-full flex gap-2",
                disabled: disabled,
                Icon {
                    width: 18,
                    height: 18,
                    icon: FaGoogle
                }
                p {
                    "Continue with Google"
                }
            }
        }
    )
}
