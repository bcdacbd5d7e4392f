//! Tests for finishing a Google sign-in from the redirect query string.
//!
//! The callback is driven against a real `SessionManager` so the assertions cover what
//! ends up in the cookie jar.

use std::rc::Rc;

use aiemail::{
    client::{
        config::Config,
        routes::callback::{complete_callback, CallbackOutcome, CallbackQuery},
        session::{channel::MemoryBus, cookie::MemoryCookies, SessionManager},
    },
    model::auth::AuthProvider,
};
use aiemail_test_utils::prelude::*;

fn session() -> Rc<SessionManager> {
    SessionManager::new(MemoryCookies::new(), MemoryBus::new().tab(), Config::default())
}

fn run(session: &SessionManager, query: &str) -> CallbackOutcome {
    complete_callback(&CallbackQuery::from(query), |access, refresh, email| {
        session.establish(access, refresh, Some(email), None)
    })
}

/// Tests a sign-in the user cancelled at Google.
///
/// Expected: no tokens persisted, redirect to /login
#[test]
fn access_denied_persists_nothing() {
    let session = session();

    let outcome = run(&session, &callback::error_query("access_denied"));

    assert_eq!(outcome.destination().to_string(), "/login");
    assert_eq!(session.access_token(), None);
    assert_eq!(session.refresh_token(), None);
    assert!(!session.is_authenticated());
}

/// Tests a redirect carrying every parameter.
///
/// Expected: both tokens persisted, Google user signed in, redirect to /inbox
#[test]
fn complete_query_signs_in() {
    let session = session();
    let access_token = factory::access_token(TEST_USER_ID, TEST_GOOGLE_EMAIL);

    let outcome = run(
        &session,
        &callback::success_query(&access_token, TEST_REFRESH_TOKEN, TEST_GOOGLE_EMAIL),
    );

    assert_eq!(outcome.destination().to_string(), "/inbox");
    assert_eq!(session.access_token(), Some(access_token));
    assert_eq!(session.refresh_token(), Some(TEST_REFRESH_TOKEN.to_string()));

    let user = session.user().unwrap();
    assert_eq!(user.email, TEST_GOOGLE_EMAIL);
    assert_eq!(user.provider, AuthProvider::Google);
}

/// Tests a redirect whose access token cannot be decoded.
///
/// Expected: nothing persisted, redirect to /login
#[test]
fn undecodable_token_persists_nothing() {
    let session = session();

    let outcome = run(
        &session,
        &callback::success_query("not-a-jwt", TEST_REFRESH_TOKEN, TEST_GOOGLE_EMAIL),
    );

    assert_eq!(
        outcome,
        CallbackOutcome::Rejected {
            message: "Failed to complete authentication".to_string()
        }
    );
    assert_eq!(session.refresh_token(), None);
}
