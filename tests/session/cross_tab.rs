//! Tests for logout propagation between tabs sharing one origin.
//!
//! Every tab gets its own `SessionManager` over a shared cookie jar and a `MemoryBus`
//! standing in for `localStorage`.

use std::{cell::Cell, rc::Rc};

use aiemail::client::{
    config::Config,
    session::{
        channel::{MemoryBus, SessionChannel},
        cookie::MemoryCookies,
        sync::{auth_state, on_logout_event, AuthState, LOGOUT_EVENT_KEY},
        SessionManager, SessionState,
    },
};
use aiemail_test_utils::prelude::*;

fn signed_in_tabs(count: usize) -> (MemoryBus, Vec<Rc<SessionManager>>) {
    let bus = MemoryBus::new();
    let cookies = Rc::new(MemoryCookies::new());

    let tabs: Vec<Rc<SessionManager>> = (0..count)
        .map(|_| SessionManager::new(cookies.clone(), bus.tab(), Config::default()))
        .collect();

    tabs[0]
        .establish(
            &factory::access_token(TEST_USER_ID, TEST_EMAIL),
            TEST_REFRESH_TOKEN,
            None,
            None,
        )
        .unwrap();
    for tab in &tabs[1..] {
        tab.restore();
        tab.listen_cross_tab().unwrap();
    }

    (bus, tabs)
}

/// Tests that a logout in one tab signs out the others.
///
/// Expected: every other tab transitions to LoggedOut and notifies its observers once
#[test]
fn logout_signs_out_other_tabs() {
    let (bus, tabs) = signed_in_tabs(3);
    let notified = Rc::new(Cell::new(0));
    for tab in &tabs[1..] {
        assert!(tab.is_authenticated());
        let notified = notified.clone();
        tab.subscribe(move |state| {
            if *state == SessionState::LoggedOut {
                notified.set(notified.get() + 1);
            }
        });
    }

    tabs[0].logout();
    bus.tick();

    for tab in &tabs {
        assert!(!tab.is_authenticated());
        assert_eq!(tab.access_token(), None);
    }
    assert_eq!(notified.get(), 2);
}

/// Tests the lifetime of the logout marker.
///
/// Verifies the marker is written by the logout and removed once the timer fires, while
/// the auth state flag stays logged out.
///
/// Expected: marker present before the tick, absent after
#[test]
fn marker_is_cleared_after_one_tick() {
    let (bus, tabs) = signed_in_tabs(2);
    let observer = bus.tab();

    tabs[0].logout();

    assert!(observer.read(LOGOUT_EVENT_KEY).unwrap().is_some());
    assert_eq!(bus.pending_removals(), 1);

    assert_eq!(bus.tick(), 1);

    assert_eq!(observer.read(LOGOUT_EVENT_KEY).unwrap(), None);
    assert_eq!(auth_state(&observer), Some(AuthState::LoggedOut));
}

/// Tests that a listener hears each broadcast exactly once.
///
/// A broadcast changes both the marker and the auth state flag; only one callback may
/// result from it, and a later logout is reported again.
///
/// Expected: one callback per logout
#[test]
fn listener_receives_one_callback_per_logout() {
    let (bus, tabs) = signed_in_tabs(1);
    let listener_tab = bus.tab();
    let calls = Rc::new(Cell::new(0));
    let _subscription = on_logout_event(&listener_tab, {
        let calls = calls.clone();
        move || calls.set(calls.get() + 1)
    })
    .unwrap();

    tabs[0].logout();
    bus.tick();
    assert_eq!(calls.get(), 1);

    tabs[0]
        .establish(
            &factory::access_token(TEST_USER_ID, TEST_EMAIL),
            TEST_REFRESH_TOKEN,
            None,
            None,
        )
        .unwrap();
    tabs[0].logout();
    bus.tick();
    assert_eq!(calls.get(), 2);
}

/// Tests that a tab which stopped listening keeps its own state.
///
/// Expected: the stale tab still reports LoggedIn after another tab logs out
#[test]
fn stopped_tab_is_not_signed_out() {
    let (bus, tabs) = signed_in_tabs(2);
    tabs[1].stop_listening();

    tabs[0].logout();
    bus.tick();

    assert!(tabs[1].is_authenticated());
}
