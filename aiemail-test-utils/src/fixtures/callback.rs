//! Builders for OAuth redirect query strings.

use url::form_urlencoded::Serializer;

/// Query string carrying tokens the way the API redirects after Google sign-in
pub fn success_query(access_token: &str, refresh_token: &str, email: &str) -> String {
    Serializer::new(String::new())
        .append_pair("accessToken", access_token)
        .append_pair("refreshToken", refresh_token)
        .append_pair("email", email)
        .finish()
}

/// Query string for a failed or cancelled Google sign-in
pub fn error_query(error: &str) -> String {
    Serializer::new(String::new())
        .append_pair("error", error)
        .finish()
}
