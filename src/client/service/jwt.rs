//! Client-side JWT payload decoding.
//!
//! Tokens are decoded only to display who is signed in. Signatures are not checked here,
//! the API verifies every token it receives, so nothing derived from these claims may be
//! used for access decisions.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    client::error::ClientError,
    model::auth::{AuthProvider, User},
};

const UNKNOWN_ID: &str = "unknown";
const UNKNOWN_EMAIL: &str = "unknown@example.com";

/// The subset of token claims the client reads
///
/// Every claim is kept as raw JSON so that an unexpected type or value falls back to the
/// defaults instead of rejecting an otherwise well-formed token.
#[derive(Debug, Default, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<serde_json::Value>,
    #[serde(default)]
    pub provider: Option<serde_json::Value>,
    #[serde(default)]
    pub exp: Option<serde_json::Value>,
    #[serde(default)]
    pub iss: Option<serde_json::Value>,
    #[serde(default)]
    pub aud: Option<serde_json::Value>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp.as_ref()?;
        let secs = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;

        DateTime::from_timestamp(secs, 0)
    }

    pub fn subject(&self) -> Option<String> {
        self.sub.as_ref().and_then(claim_text)
    }

    pub fn email(&self) -> Option<String> {
        self.email.as_ref().and_then(claim_text)
    }

    /// `google` marks a Google account, anything else is an email/password account
    pub fn provider(&self) -> AuthProvider {
        match self.provider.as_ref().and_then(serde_json::Value::as_str) {
            Some("google") => AuthProvider::Google,
            _ => AuthProvider::default(),
        }
    }

    fn id(&self) -> String {
        self.subject()
            .or_else(|| self.user_id.as_ref().and_then(claim_text))
            .unwrap_or_else(|| UNKNOWN_ID.to_string())
    }
}

/// Reads a string or numeric claim as text; empty strings count as missing
fn claim_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decodes the payload segment of a `header.payload.signature` token
pub fn decode_claims(token: &str) -> Result<Claims, ClientError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() < 3 {
        return Err(ClientError::InvalidToken);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|_| ClientError::InvalidToken)?;

    serde_json::from_slice(&payload).map_err(|_| ClientError::InvalidToken)
}

/// Derives the displayed user from an access token
///
/// An explicit `email`, as handed over by the Google OAuth redirect, takes precedence over
/// the token's own claims and marks the user as a Google account.
pub fn user_from_token(token: &str, email: Option<&str>) -> Result<User, ClientError> {
    let claims = decode_claims(token)?;
    let email = email.filter(|e| !e.is_empty());

    let user_email = email
        .map(str::to_string)
        .or_else(|| claims.email())
        .or_else(|| claims.subject())
        .unwrap_or_else(|| UNKNOWN_EMAIL.to_string());

    let provider = match email {
        Some(_) => AuthProvider::Google,
        None => claims.provider(),
    };

    let name = user_email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(User {
        id: claims.id(),
        email: user_email,
        name,
        provider,
    })
}

#[cfg(test)]
mod tests {
    use aiemail_test_utils::prelude::*;

    use super::*;

    mod decode_claims {
        use super::*;

        #[test]
        fn rejects_fewer_than_three_segments() {
            assert_eq!(decode_claims("only.two").unwrap_err(), ClientError::InvalidToken);
            assert_eq!(decode_claims("").unwrap_err(), ClientError::InvalidToken);
        }

        #[test]
        fn rejects_payload_that_is_not_base64() {
            assert_eq!(decode_claims("a.!!!.c").unwrap_err(), ClientError::InvalidToken);
        }

        #[test]
        fn rejects_payload_that_is_not_json() {
            let token = factory::token_with_raw_payload(b"not json");

            assert_eq!(decode_claims(&token).unwrap_err(), ClientError::InvalidToken);
        }

        #[test]
        fn reads_expiry() {
            let token = factory::token(serde_json::json!({ "sub": "42", "exp": 1_705_312_800 }));

            let claims = decode_claims(&token).unwrap();

            assert_eq!(
                claims.expires_at().unwrap().to_rfc3339(),
                "2024-01-15T10:00:00+00:00"
            );
        }
    }

    mod user_from_token {
        use super::*;

        #[test]
        fn uses_payload_fields() {
            let token = factory::token(serde_json::json!({
                "sub": "user-1",
                "email": "jane.doe@example.com",
                "provider": "email"
            }));

            let user = user_from_token(&token, None).unwrap();

            assert_eq!(user.id, "user-1");
            assert_eq!(user.email, "jane.doe@example.com");
            assert_eq!(user.name, "jane.doe");
            assert_eq!(user.provider, AuthProvider::Email);
        }

        #[test]
        fn explicit_email_wins_and_marks_google() {
            let token = factory::access_token("user-1", "token@example.com");

            let user = user_from_token(&token, Some("oauth@gmail.com")).unwrap();

            assert_eq!(user.email, "oauth@gmail.com");
            assert_eq!(user.name, "oauth");
            assert_eq!(user.provider, AuthProvider::Google);
        }

        #[test]
        fn falls_back_to_user_id_and_defaults() {
            let token = factory::token(serde_json::json!({ "userId": 7 }));

            let user = user_from_token(&token, None).unwrap();

            assert_eq!(user.id, "7");
            assert_eq!(user.email, "unknown@example.com");
            assert_eq!(user.name, "unknown");
        }

        #[test]
        fn unknown_provider_falls_back_to_email() {
            let token = factory::token(serde_json::json!({
                "sub": "u1",
                "email": "a@b.c",
                "provider": "github"
            }));

            let user = user_from_token(&token, None).unwrap();

            assert_eq!(user.id, "u1");
            assert_eq!(user.email, "a@b.c");
            assert_eq!(user.provider, AuthProvider::Email);
        }

        #[test]
        fn numeric_subject_is_used_as_id() {
            let token = factory::token(serde_json::json!({ "sub": 42, "email": "a@b.c" }));

            let user = user_from_token(&token, None).unwrap();

            assert_eq!(user.id, "42");
            assert_eq!(user.email, "a@b.c");
        }

        #[test]
        fn claims_of_unexpected_types_use_defaults() {
            let token = factory::token(serde_json::json!({
                "sub": null,
                "email": ["a@b.c"],
                "provider": 3,
                "exp": "soon",
                "iss": { "name": "api" }
            }));

            let user = user_from_token(&token, None).unwrap();

            assert_eq!(user.id, "unknown");
            assert_eq!(user.email, "unknown@example.com");
            assert_eq!(user.provider, AuthProvider::Email);
            assert!(decode_claims(&token).unwrap().expires_at().is_none());
        }

        #[test]
        fn malformed_token_is_an_error() {
            assert_eq!(
                user_from_token("not-a-jwt", Some("a@b.c")).unwrap_err(),
                ClientError::InvalidToken
            );
        }
    }
}
