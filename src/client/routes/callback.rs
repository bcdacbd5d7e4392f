//! Landing page of the Google sign-in redirect.
//!
//! The API redirects here with either the issued tokens or an `error` in the query string.
//! The page signs the tab in and moves on to the inbox, or returns to the login page.

use std::fmt;

use dioxus::document::Title;
use dioxus::prelude::*;
use dioxus_logger::tracing;
use url::form_urlencoded;

use crate::{
    client::{
        components::Page,
        error::ClientError,
        hooks::{use_auth, use_toasts},
        router::Route,
        util::time::sleep,
    },
    model::auth::User,
};

/// Query parameters of the callback URL, empty values count as missing
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallbackQuery {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub email: Option<String>,
    pub error: Option<String>,
}

impl From<&str> for CallbackQuery {
    fn from(query: &str) -> Self {
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "accessToken" => &mut parsed.access_token,
                "refreshToken" => &mut parsed.refresh_token,
                "email" => &mut parsed.email,
                "error" => &mut parsed.error,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.into_owned());
        }

        parsed
    }
}

impl fmt::Display for CallbackQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("accessToken", &self.access_token),
            ("refreshToken", &self.refresh_token),
            ("email", &self.email),
            ("error", &self.error),
        ] {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        f.write_str(&serializer.finish())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CallbackOutcome {
    /// Nothing was stored, the message is shown before returning to the login page
    Rejected { message: String },
    SignedIn { user: User },
}

impl CallbackOutcome {
    pub fn destination(&self) -> Route {
        match self {
            Self::Rejected { .. } => Route::Login {},
            Self::SignedIn { .. } => Route::Inbox {},
        }
    }
}

/// Signs in with the tokens of the callback query
///
/// `establish` receives the access token, refresh token and email and is only called when
/// the query carries no error and all three values.
pub fn complete_callback(
    query: &CallbackQuery,
    establish: impl FnOnce(&str, &str, &str) -> Result<User, ClientError>,
) -> CallbackOutcome {
    if let Some(error) = &query.error {
        tracing::error!("Google authentication failed: {}", error);
        return CallbackOutcome::Rejected {
            message: format!("Google authentication failed: {}", error),
        };
    }

    let (Some(access_token), Some(refresh_token), Some(email)) =
        (&query.access_token, &query.refresh_token, &query.email)
    else {
        tracing::error!("Callback is missing tokens");
        return CallbackOutcome::Rejected {
            message: "Authentication tokens not received".to_string(),
        };
    };

    match establish(access_token, refresh_token, email) {
        Ok(user) => CallbackOutcome::SignedIn { user },
        Err(e) => {
            tracing::error!("Failed to store callback tokens: {}", e);
            CallbackOutcome::Rejected {
                message: "Failed to complete authentication".to_string(),
            }
        }
    }
}

#[component]
pub fn AuthCallback(query: CallbackQuery) -> Element {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigator = use_navigator();
    let mut processed = use_signal(|| false);

    use_effect(move || {
        if *processed.peek() {
            return;
        }
        processed.set(true);

        let outcome = complete_callback(&query, |access, refresh, email| {
            auth.set_auth_state(access, refresh, email)
        });

        match outcome {
            CallbackOutcome::Rejected { message } => {
                toasts.error(message);
                navigator.replace(Route::Login {});
            }
            CallbackOutcome::SignedIn { .. } => {
                toasts.success("Successfully signed in with Google!");
                let delay = auth.session().config().callback_redirect_delay;
                spawn(async move {
                    sleep(delay).await;
                    navigator.replace(Route::Inbox {});
                });
            }
        }
    });

    rsx!(
        Title { "Signing in | AIEmail" }
        Page { class: "flex items-center justify-center",
            div { class: "flex flex-col items-center gap-4",
                span { class: "loading loading-spinner loading-lg" }
                p { "Completing sign in..." }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::auth::AuthProvider;

    fn user() -> User {
        User {
            id: "user-123".to_string(),
            email: "jane.doe@gmail.com".to_string(),
            name: "jane.doe".to_string(),
            provider: AuthProvider::Google,
        }
    }

    mod query {
        use super::*;

        #[test]
        fn parses_known_parameters() {
            let query =
                CallbackQuery::from("?accessToken=a.b.c&refreshToken=r&email=jane%40gmail.com");

            assert_eq!(query.access_token.as_deref(), Some("a.b.c"));
            assert_eq!(query.refresh_token.as_deref(), Some("r"));
            assert_eq!(query.email.as_deref(), Some("jane@gmail.com"));
            assert_eq!(query.error, None);
        }

        #[test]
        fn empty_values_are_missing() {
            let query = CallbackQuery::from("accessToken=&error=");

            assert_eq!(query, CallbackQuery::default());
        }

        #[test]
        fn display_is_parseable() {
            let query = CallbackQuery {
                error: Some("access_denied".to_string()),
                ..Default::default()
            };

            assert_eq!(query.to_string(), "error=access_denied");
            assert_eq!(CallbackQuery::from(query.to_string().as_str()), query);
        }
    }

    mod complete_callback {
        use super::*;

        #[test]
        fn error_parameter_rejects_without_storing() {
            let query =
                CallbackQuery::from("error=access_denied&accessToken=a&refreshToken=r&email=e");

            let outcome = complete_callback(&query, |_, _, _| panic!("tokens must not be stored"));

            assert_eq!(
                outcome,
                CallbackOutcome::Rejected {
                    message: "Google authentication failed: access_denied".to_string()
                }
            );
            assert_eq!(outcome.destination(), Route::Login {});
        }

        #[test]
        fn missing_token_rejects_without_storing() {
            let query = CallbackQuery::from("accessToken=a&email=e");

            let outcome = complete_callback(&query, |_, _, _| panic!("tokens must not be stored"));

            assert_eq!(
                outcome,
                CallbackOutcome::Rejected {
                    message: "Authentication tokens not received".to_string()
                }
            );
        }

        #[test]
        fn all_parameters_sign_in() {
            let query =
                CallbackQuery::from("accessToken=a&refreshToken=r&email=jane.doe%40gmail.com");

            let outcome = complete_callback(&query, |access, refresh, email| {
                assert_eq!((access, refresh, email), ("a", "r", "jane.doe@gmail.com"));
                Ok(user())
            });

            assert_eq!(outcome, CallbackOutcome::SignedIn { user: user() });
            assert_eq!(outcome.destination(), Route::Inbox {});
        }

        #[test]
        fn storage_failure_rejects() {
            let query = CallbackQuery::from("accessToken=a&refreshToken=r&email=e");

            let outcome = complete_callback(&query, |_, _, _| Err(ClientError::InvalidToken));

            assert_eq!(
                outcome,
                CallbackOutcome::Rejected {
                    message: "Failed to complete authentication".to_string()
                }
            );
        }
    }
}
