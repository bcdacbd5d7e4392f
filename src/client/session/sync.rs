//! Logout propagation between tabs.
//!
//! Logging out writes a timestamped marker under [`LOGOUT_EVENT_KEY`] and sets
//! [`AUTH_STATE_KEY`] to `logged_out`. The marker is removed shortly afterwards so the next
//! logout changes the key again, since storage change notifications only fire on actual
//! changes. Failure to broadcast is logged and otherwise ignored: a tab that misses the
//! message stays signed in until its next API call is rejected.

use std::{cell::Cell, rc::Rc};

use chrono::{Duration, Utc};
use dioxus_logger::tracing;
use serde::{Deserialize, Serialize};

use crate::client::{
    error::ClientError,
    session::channel::{SessionChannel, StorageChange, Subscription},
};

pub const LOGOUT_EVENT_KEY: &str = "auth_logout_event";
pub const AUTH_STATE_KEY: &str = "auth_state";

const LOGOUT_ACTION: &str = "logout";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    LoggedIn,
    LoggedOut,
}

impl AuthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoggedIn => "logged_in",
            Self::LoggedOut => "logged_out",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "logged_in" => Some(Self::LoggedIn),
            "logged_out" => Some(Self::LoggedOut),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutEvent {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub action: String,
}

impl LogoutEvent {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            action: LOGOUT_ACTION.to_string(),
        }
    }
}

pub fn set_auth_state(channel: &dyn SessionChannel, state: AuthState) {
    if let Err(e) = channel.write(AUTH_STATE_KEY, state.as_str()) {
        tracing::error!("Error setting auth state: {}", e);
    }
}

pub fn auth_state(channel: &dyn SessionChannel) -> Option<AuthState> {
    match channel.read(AUTH_STATE_KEY) {
        Ok(value) => value.as_deref().and_then(AuthState::parse),
        Err(e) => {
            tracing::error!("Error getting auth state: {}", e);
            None
        }
    }
}

/// Tells other tabs this session has ended
pub fn trigger_logout_event(channel: &dyn SessionChannel, marker_ttl: Duration) {
    let result = serde_json::to_string(&LogoutEvent::now())
        .map_err(|e| ClientError::Parse(e.to_string()))
        .and_then(|event| channel.write(LOGOUT_EVENT_KEY, &event));

    match result {
        Ok(()) => channel.remove_after(LOGOUT_EVENT_KEY, marker_ttl),
        Err(e) => tracing::error!("Error triggering logout event: {}", e),
    }

    set_auth_state(channel, AuthState::LoggedOut);
}

/// Decides which storage changes mean "another tab logged out"
///
/// A broadcast changes both the marker and the auth state; while the marker from that
/// broadcast is live the auth state change is part of the same logout and is not reported
/// again.
#[derive(Debug, Default)]
pub struct LogoutDetector {
    marker_live: bool,
}

impl LogoutDetector {
    pub fn observe(&mut self, change: &StorageChange) -> bool {
        match (change.key.as_str(), change.new_value.as_deref()) {
            (LOGOUT_EVENT_KEY, None) => {
                self.marker_live = false;
                false
            }
            (LOGOUT_EVENT_KEY, Some(value)) => match serde_json::from_str::<LogoutEvent>(value) {
                Ok(event) if event.action == LOGOUT_ACTION => {
                    tracing::info!("Multi-tab logout detected");
                    self.marker_live = true;
                    true
                }
                Ok(_) => false,
                Err(e) => {
                    tracing::error!("Error parsing logout event: {}", e);
                    false
                }
            },
            (AUTH_STATE_KEY, Some(value))
                if AuthState::parse(value) == Some(AuthState::LoggedOut) =>
            {
                if self.marker_live {
                    false
                } else {
                    tracing::info!("Auth state change detected: logged out");
                    true
                }
            }
            _ => false,
        }
    }
}

/// Invokes `callback` once for every logout made in another tab
pub fn on_logout_event(
    channel: &dyn SessionChannel,
    callback: impl Fn() + 'static,
) -> Result<Subscription, ClientError> {
    let detector = Rc::new(Cell::new(LogoutDetector::default()));

    channel.subscribe(Rc::new(move |change: &StorageChange| {
        let mut state = detector.take();
        let logged_out = state.observe(change);
        detector.set(state);

        if logged_out {
            callback();
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::client::session::channel::MemoryBus;

    fn change(key: &str, value: Option<&str>) -> StorageChange {
        StorageChange {
            key: key.to_string(),
            new_value: value.map(str::to_string),
        }
    }

    mod logout_detector {
        use super::*;

        #[test]
        fn marker_then_state_reports_once() {
            let mut detector = LogoutDetector::default();
            let marker = r#"{"timestamp":1,"action":"logout"}"#;

            assert!(detector.observe(&change(LOGOUT_EVENT_KEY, Some(marker))));
            assert!(!detector.observe(&change(AUTH_STATE_KEY, Some("logged_out"))));
            assert!(!detector.observe(&change(LOGOUT_EVENT_KEY, None)));
        }

        #[test]
        fn bare_state_change_reports() {
            let mut detector = LogoutDetector::default();

            assert!(detector.observe(&change(AUTH_STATE_KEY, Some("logged_out"))));
            assert!(!detector.observe(&change(AUTH_STATE_KEY, Some("logged_in"))));
        }

        #[test]
        fn ignores_malformed_and_foreign_markers() {
            let mut detector = LogoutDetector::default();

            assert!(!detector.observe(&change(LOGOUT_EVENT_KEY, Some("not json"))));
            assert!(!detector.observe(&change(
                LOGOUT_EVENT_KEY,
                Some(r#"{"timestamp":1,"action":"login"}"#)
            )));
            assert!(!detector.observe(&change("theme", Some("dark"))));
        }
    }

    mod trigger_logout_event {
        use super::*;

        #[test]
        fn sets_marker_and_clears_it_on_next_tick() {
            let bus = MemoryBus::new();
            let tab = bus.tab();

            trigger_logout_event(&tab, Duration::milliseconds(100));

            let marker = tab.read(LOGOUT_EVENT_KEY).unwrap().unwrap();
            let event: LogoutEvent = serde_json::from_str(&marker).unwrap();
            assert_eq!(event.action, "logout");
            assert_eq!(auth_state(&tab), Some(AuthState::LoggedOut));

            bus.tick();

            assert_eq!(tab.read(LOGOUT_EVENT_KEY).unwrap(), None);
            assert_eq!(auth_state(&tab), Some(AuthState::LoggedOut));
        }

        #[test]
        fn other_tab_gets_one_callback_per_trigger() {
            let bus = MemoryBus::new();
            let (a, b) = (bus.tab(), bus.tab());
            set_auth_state(&a, AuthState::LoggedIn);

            let calls = Rc::new(Cell::new(0));
            let counter = calls.clone();
            let _sub = on_logout_event(&b, move || counter.set(counter.get() + 1)).unwrap();

            trigger_logout_event(&a, Duration::milliseconds(100));
            bus.tick();
            assert_eq!(calls.get(), 1);

            trigger_logout_event(&a, Duration::milliseconds(100));
            bus.tick();
            assert_eq!(calls.get(), 2);
        }

        #[test]
        fn triggering_tab_gets_no_callback() {
            let bus = MemoryBus::new();
            let a = bus.tab();

            let calls = Rc::new(Cell::new(0));
            let counter = calls.clone();
            let _sub = on_logout_event(&a, move || counter.set(counter.get() + 1)).unwrap();

            trigger_logout_event(&a, Duration::milliseconds(100));
            bus.tick();

            assert_eq!(calls.get(), 0);
        }
    }
}
