//! Tests for reading the unsigned access token payload.

use aiemail::client::{
    error::ClientError,
    service::jwt::{decode_claims, user_from_token},
};
use aiemail_test_utils::prelude::*;
use serde_json::json;

/// Tests tokens with fewer than three segments.
///
/// Expected: Err(InvalidToken)
#[test]
fn short_token_is_invalid() {
    assert_eq!(
        decode_claims("header.payload").unwrap_err(),
        ClientError::InvalidToken
    );
    assert_eq!(decode_claims("opaque").unwrap_err(), ClientError::InvalidToken);
}

/// Tests a payload that is not JSON.
///
/// Expected: Err(InvalidToken)
#[test]
fn non_json_payload_is_invalid() {
    let token = factory::token_with_raw_payload(b"not json");

    assert_eq!(user_from_token(&token, None), Err(ClientError::InvalidToken));
}

/// Tests the user built for a Google sign-in.
///
/// The email handed over by the callback wins over the payload and marks the provider.
///
/// Expected: email from the callback, name from its local part
#[test]
fn explicit_email_marks_google_user() {
    let token = factory::token(json!({ "sub": TEST_USER_ID }));

    let user = user_from_token(&token, Some(TEST_GOOGLE_EMAIL)).unwrap();

    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.email, TEST_GOOGLE_EMAIL);
    assert_eq!(user.name, "jane.doe");
    assert_eq!(user.provider, aiemail::model::auth::AuthProvider::Google);
}
