//! Authentication context shared by every page.
//!
//! The [`SessionManager`] stays the owner of the session. [`AuthContext`] mirrors its state
//! into a signal so components re-render on login, logout and logouts from other tabs.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::{
        config::Config,
        error::ClientError,
        service::{api::ApiClient, AuthService, HttpAuthApi},
        session::{SessionManager, SessionState},
    },
    model::auth::{LoginCredentials, RegisterCredentials, User},
};

#[derive(Clone)]
pub struct AuthContext {
    service: Rc<AuthService<HttpAuthApi>>,
    state: Signal<SessionState>,
    pending: Signal<bool>,
}

impl AuthContext {
    pub fn session(&self) -> &Rc<SessionManager> {
        self.service.session()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), SessionState::LoggedIn(_))
    }

    /// Whether a login or registration request is in flight
    pub fn is_loading(&self) -> bool {
        *self.pending.read()
    }

    pub async fn login(&self, credentials: LoginCredentials) -> Result<User, ClientError> {
        let mut pending = self.pending;
        pending.set(true);
        let result = self.service.login(&credentials).await;
        pending.set(false);
        result
    }

    pub async fn register(&self, credentials: RegisterCredentials) -> Result<User, ClientError> {
        let mut pending = self.pending;
        pending.set(true);
        let result = self.service.register(&credentials).await;
        pending.set(false);
        result
    }

    /// Signs in with tokens received on the OAuth callback page
    pub fn set_auth_state(
        &self,
        access_token: &str,
        refresh_token: &str,
        email: &str,
    ) -> Result<User, ClientError> {
        self.service
            .accept_tokens(access_token, refresh_token, email)
    }

    pub async fn logout(&self) {
        self.service.logout().await;
    }

    /// Signs out when an API call was rejected for an expired or revoked token
    pub fn handle_error(&self, error: &ClientError) {
        if *error == ClientError::Unauthorized {
            tracing::warn!("Access token rejected, signing out");
            self.session().logout();
        }
    }
}

#[cfg(feature = "web")]
fn create_session(config: Config) -> Rc<SessionManager> {
    SessionManager::browser(config)
}

#[cfg(not(feature = "web"))]
fn create_session(config: Config) -> Rc<SessionManager> {
    use crate::client::session::{channel::MemoryBus, cookie::MemoryCookies};

    SessionManager::new(MemoryCookies::new(), MemoryBus::new().tab(), config)
}

/// Restores the session from cookies and provides the [`AuthContext`] to descendants
pub fn use_auth_provider(config: Config) -> AuthContext {
    use_context_provider(move || {
        let session = create_session(config);
        session.restore();

        if let Err(e) = session.listen_cross_tab() {
            tracing::error!("Failed to listen for logouts from other tabs: {}", e);
        }

        let state = Signal::new(session.state());
        session.subscribe(move |next| {
            let mut state = state;
            state.set(next.clone());
        });

        let api = HttpAuthApi::new(ApiClient::new(session.clone()));

        AuthContext {
            service: Rc::new(AuthService::new(api, session)),
            state,
            pending: Signal::new(false),
        }
    })
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
