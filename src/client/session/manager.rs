use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use dioxus_logger::tracing;

use crate::{
    client::{
        config::Config,
        error::ClientError,
        service::jwt,
        session::{
            channel::{SessionChannel, Subscription},
            cookie::CookieStore,
            sync::{self, AuthState},
            tokens::TokenStore,
        },
    },
    model::auth::User,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::LoggedIn(user) => Some(user),
            Self::LoggedOut => None,
        }
    }
}

pub type ObserverId = usize;

type Observer = Rc<dyn Fn(&SessionState)>;

/// Single owner of the session of this tab
///
/// Every transition, whether caused locally or by another tab logging out, is pushed to the
/// registered observers.
pub struct SessionManager {
    config: Config,
    tokens: TokenStore<Box<dyn CookieStore>>,
    channel: Box<dyn SessionChannel>,
    state: RefCell<SessionState>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
    next_observer: Cell<ObserverId>,
    cross_tab: RefCell<Option<Subscription>>,
}

impl SessionManager {
    pub fn new(
        cookies: impl CookieStore + 'static,
        channel: impl SessionChannel + 'static,
        config: Config,
    ) -> Rc<Self> {
        let cookies: Box<dyn CookieStore> = Box::new(cookies);

        Rc::new(Self {
            tokens: TokenStore::new(cookies, &config),
            channel: Box::new(channel),
            config,
            state: RefCell::new(SessionState::LoggedOut),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(0),
            cross_tab: RefCell::new(None),
        })
    }

    /// Manager backed by the document's cookies and `localStorage`
    #[cfg(feature = "web")]
    pub fn browser(config: Config) -> Rc<Self> {
        use crate::client::session::{channel::LocalStorageChannel, cookie::BrowserCookies};

        Self::new(BrowserCookies, LocalStorageChannel, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::LoggedIn(_))
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.access_token()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.refresh_token()
    }

    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) -> ObserverId {
        let id = self.next_observer.get();
        self.next_observer.set(id + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.observers.borrow_mut().retain(|(oid, _)| *oid != id);
    }

    /// Rebuilds the session from the access token cookie left by a previous page load
    pub fn restore(&self) -> SessionState {
        let state = match self.tokens.access_token() {
            Some(token) => match jwt::user_from_token(&token, None) {
                Ok(user) => SessionState::LoggedIn(user),
                Err(e) => {
                    tracing::warn!("Discarding unreadable access token: {}", e);
                    self.tokens.clear_access_token();
                    SessionState::LoggedOut
                }
            },
            None => SessionState::LoggedOut,
        };

        self.transition(state.clone());
        state
    }

    /// Persists a freshly issued token pair and signs the tab in
    ///
    /// The user shown is `user` when the API returned one, otherwise it is decoded from the
    /// access token. Nothing is persisted if the token cannot be decoded.
    pub fn establish(
        &self,
        access_token: &str,
        refresh_token: &str,
        email: Option<&str>,
        user: Option<User>,
    ) -> Result<User, ClientError> {
        let user = match user {
            Some(user) => user,
            None => jwt::user_from_token(access_token, email)?,
        };

        self.tokens.set_tokens(access_token, refresh_token)?;
        sync::set_auth_state(self.channel.as_ref(), AuthState::LoggedIn);

        tracing::info!(user_id = %user.id, "Signed in as {}", user.email);
        self.transition(SessionState::LoggedIn(user.clone()));

        Ok(user)
    }

    /// Stores tokens returned by a refresh without touching the signed in user
    pub fn update_tokens(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), ClientError> {
        self.tokens.set_access_token(access_token)?;
        if let Some(refresh_token) = refresh_token {
            self.tokens.set_refresh_token(refresh_token)?;
        }
        Ok(())
    }

    /// Clears this tab's tokens and tells other tabs to sign out too
    pub fn logout(&self) {
        self.tokens.clear_all();
        sync::trigger_logout_event(self.channel.as_ref(), self.config.logout_marker_ttl);
        self.transition(SessionState::LoggedOut);
    }

    /// Starts following logouts made in other tabs
    pub fn listen_cross_tab(self: &Rc<Self>) -> Result<(), ClientError> {
        let manager: Weak<Self> = Rc::downgrade(self);

        let subscription = sync::on_logout_event(self.channel.as_ref(), move || {
            if let Some(manager) = manager.upgrade() {
                manager.transition(SessionState::LoggedOut);
            }
        })?;

        *self.cross_tab.borrow_mut() = Some(subscription);
        Ok(())
    }

    pub fn stop_listening(&self) {
        self.cross_tab.borrow_mut().take();
    }

    fn transition(&self, next: SessionState) {
        {
            let mut state = self.state.borrow_mut();
            if *state == next {
                return;
            }
            *state = next.clone();
        }

        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in observers {
            observer(&next);
        }
    }
}
