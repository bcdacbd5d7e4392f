use dioxus::prelude::*;

use crate::{
    client::{components::auth::GoogleAuthButton, router::Route},
    model::auth::RegisterCredentials,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks the registration fields before anything is sent
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterCredentials, String> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("All fields are required".to_string());
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }

    Ok(RegisterCredentials {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[component]
pub fn RegisterForm(on_submit: EventHandler<RegisterCredentials>, is_loading: bool) -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();

        match validate_registration(
            &name.read(),
            &email.read(),
            &password.read(),
            &confirm_password.read(),
        ) {
            Ok(credentials) => {
                error.set(None);
                on_submit.call(credentials);
            }
            Err(message) => error.set(Some(message)),
        }
    };

    rsx!(
        form { class: "flex flex-col gap-4", onsubmit: submit,
            if let Some(message) = error() {
                div { role: "alert", class: "alert alert-error text-sm",
                    "{message}"
                }
            }
            label { class: "form-control w-full",
                span { class: "label-text", "Name" }
                input {
                    class: "input input-bordered w-full",
                    autocomplete: "name",
                    disabled: is_loading,
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
            }
            label { class: "form-control w-full",
                span { class: "label-text", "Email" }
                input {
                    class: "input input-bordered w-full",
                    r#type: "email",
                    autocomplete: "email",
                    disabled: is_loading,
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            label { class: "form-control w-full",
                span { class: "label-text", "Password" }
                input {
                    class: "input input-bordered w-full",
                    r#type: "password",
                    autocomplete: "new-password",
                    disabled: is_loading,
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            label { class: "form-control w-full",
                span { class: "label-text", "Confirm password" }
                input {
                    class: "input input-bordered w-full",
                    r#type: "password",
                    autocomplete: "new-password",
                    disabled: is_loading,
                    value: "{confirm_password}",
                    oninput: move |evt| confirm_password.set(evt.value()),
                }
            }
            button {
                class: "btn btn-primary w-full",
                r#type: "submit",
                disabled: is_loading,
                if is_loading {
                    span { class: "loading loading-spinner loading-sm" }
                    "Creating account..."
                } else {
                    "Create account"
                }
            }
            div { class: "divider text-sm", "or" }
            GoogleAuthButton { disabled: is_loading }
            p { class: "text-sm text-center",
                "Already have an account? "
                Link { class: "link link-primary", to: Route::Login {}, "Sign in" }
            }
        }
    )
}
