//! Factory functions for generating unsigned test tokens.
//!
//! The client never verifies signatures, so tokens only need a well-formed header and
//! payload. The signature segment is a fixed placeholder.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const SIGNATURE: &str = "c2lnbmF0dXJl";

/// Create a token whose payload is exactly the given claims
pub fn token(claims: Value) -> String {
    token_with_raw_payload(claims.to_string().as_bytes())
}

/// Create a token from arbitrary payload bytes, used for malformed-payload cases
pub fn token_with_raw_payload(payload: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(HEADER),
        URL_SAFE_NO_PAD.encode(payload),
        SIGNATURE
    )
}

/// Create an access token for a password account expiring in 15 minutes
pub fn access_token(sub: &str, email: &str) -> String {
    token(json!({
        "sub": sub,
        "email": email,
        "provider": "email",
        "iss": "aiemail-api",
        "aud": "aiemail-web",
        "exp": (Utc::now() + Duration::minutes(15)).timestamp(),
    }))
}
