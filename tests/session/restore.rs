//! Tests for rebuilding the session on page load.

use std::rc::Rc;

use aiemail::client::{
    config::Config,
    session::{channel::MemoryBus, cookie::MemoryCookies, SessionManager, SessionState},
};
use aiemail::model::auth::AuthProvider;
use aiemail_test_utils::prelude::*;

/// Tests a reload after signing in.
///
/// Expected: LoggedIn with the user decoded from the access token cookie
#[test]
fn restores_user_from_cookie() {
    let bus = MemoryBus::new();
    let cookies = Rc::new(MemoryCookies::new());
    let first = SessionManager::new(cookies.clone(), bus.tab(), Config::default());
    first
        .establish(
            &factory::access_token(TEST_USER_ID, TEST_EMAIL),
            TEST_REFRESH_TOKEN,
            None,
            None,
        )
        .unwrap();

    let reloaded = SessionManager::new(cookies, bus.tab(), Config::default());
    let state = reloaded.restore();

    let SessionState::LoggedIn(user) = &state else {
        panic!("expected a restored session, got {:?}", state);
    };
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.email, TEST_EMAIL);
    assert_eq!(user.name, "jane");
}

/// Tests a first visit without cookies.
///
/// Expected: LoggedOut
#[test]
fn without_cookie_is_logged_out() {
    let session =
        SessionManager::new(MemoryCookies::new(), MemoryBus::new().tab(), Config::default());

    assert_eq!(session.restore(), SessionState::LoggedOut);
    assert!(!session.is_authenticated());
}

/// Tests a cookie holding a token issued for another provider with a numeric subject.
///
/// Expected: LoggedIn, the unknown provider read as an email account
#[test]
fn restores_token_with_unfamiliar_claims() {
    let cookies = Rc::new(MemoryCookies::new());
    let token = factory::token(serde_json::json!({
        "sub": 42,
        "email": TEST_EMAIL,
        "provider": "github"
    }));
    let first = SessionManager::new(cookies.clone(), MemoryBus::new().tab(), Config::default());
    first.establish(&token, TEST_REFRESH_TOKEN, None, None).unwrap();

    let reloaded = SessionManager::new(cookies, MemoryBus::new().tab(), Config::default());
    let state = reloaded.restore();

    let SessionState::LoggedIn(user) = &state else {
        panic!("expected a restored session, got {:?}", state);
    };
    assert_eq!(user.id, "42");
    assert_eq!(user.email, TEST_EMAIL);
    assert_eq!(user.provider, AuthProvider::Email);
}
