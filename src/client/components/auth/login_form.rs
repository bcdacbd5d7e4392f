use dioxus::prelude::*;

use crate::{
    client::{components::auth::GoogleAuthButton, router::Route},
    model::auth::LoginCredentials,
};

/// Checks the login fields before anything is sent
pub fn validate_login(email: &str, password: &str) -> Result<LoginCredentials, String> {
    let email = email.trim();

    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address".to_string());
    }

    Ok(LoginCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[component]
pub fn LoginForm(on_submit: EventHandler<LoginCredentials>, is_loading: bool) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();

        match validate_login(&email.read(), &password.read()) {
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
                span { class: "label-text", "Email" }
                input {
                    class: "input input-bordered w-full",
                    r#type: "email",
                    autocomplete: "email",
                    placeholder: "you@example.com",
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
                    autocomplete: "current-password",
                    disabled: is_loading,
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            button {
                class: "btn btn-primary w-full",
                r#type: "submit",
                disabled: is_loading,
                if is_loading {
                    span { class: "loading loading-spinner loading-sm" }
                    "Signing in..."
                } else {
                    "Sign in"
                }
            }
            div { class: "divider text-sm", "or" }
            GoogleAuthButton { disabled: is_loading }
            p { class: "text-sm text-center",
                "Don't have an account? "
                Link { class: "link link-primary", to: Route::Register {}, "Sign up" }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trimmed_email() {
        let credentials = validate_login("  jane@example.com ", "secret").unwrap();

        assert_eq!(credentials.email, "jane@example.com");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            validate_login("", "secret").unwrap_err(),
            "Email and password are required"
        );
        assert_eq!(
            validate_login("jane@example.com", "").unwrap_err(),
            "Email and password are required"
        );
    }

    #[test]
    fn rejects_email_without_at_sign() {
        assert_eq!(
            validate_login("jane", "secret").unwrap_err(),
            "Please enter a valid email address"
        );
    }
}
