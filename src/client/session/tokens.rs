use dioxus_logger::tracing;

use crate::client::{
    config::Config,
    error::ClientError,
    service::jwt,
    session::cookie::{CookieOptions, CookieStore, SameSite},
};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Shortens a token for log output
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(20).collect();
    format!("{}...", prefix)
}

/// Access and refresh tokens persisted as cookies
pub struct TokenStore<C: CookieStore> {
    cookies: C,
    access_options: CookieOptions,
    refresh_options: CookieOptions,
}

impl<C: CookieStore> TokenStore<C> {
    pub fn new(cookies: C, config: &Config) -> Self {
        let options = |expiry| CookieOptions {
            expires: Some(expiry),
            path: "/".to_string(),
            secure: config.secure_cookies,
            same_site: SameSite::Lax,
        };

        Self {
            cookies,
            access_options: options(config.access_token_expiry),
            refresh_options: options(config.refresh_token_expiry),
        }
    }

    pub fn set_access_token(&self, token: &str) -> Result<(), ClientError> {
        self.write(ACCESS_TOKEN_KEY, token, &self.access_options)
    }

    pub fn set_refresh_token(&self, token: &str) -> Result<(), ClientError> {
        self.write(REFRESH_TOKEN_KEY, token, &self.refresh_options)
    }

    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), ClientError> {
        self.set_access_token(access_token)?;
        self.set_refresh_token(refresh_token)
    }

    pub fn access_token(&self) -> Option<String> {
        let token = self.read(ACCESS_TOKEN_KEY)?;

        match jwt::decode_claims(&token) {
            Ok(claims) => tracing::debug!(
                exp = ?claims.expires_at(),
                iss = ?claims.iss,
                aud = ?claims.aud,
                "Read access token {}",
                redact(&token)
            ),
            Err(e) => tracing::debug!("Access token in cookie could not be decoded: {}", e),
        }

        Some(token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    pub fn has_access_token(&self) -> bool {
        self.read(ACCESS_TOKEN_KEY).is_some()
    }

    pub fn has_refresh_token(&self) -> bool {
        self.read(REFRESH_TOKEN_KEY).is_some()
    }

    pub fn clear_access_token(&self) {
        self.delete(ACCESS_TOKEN_KEY);
    }

    pub fn clear_refresh_token(&self) {
        self.delete(REFRESH_TOKEN_KEY);
    }

    pub fn clear_all(&self) {
        self.clear_access_token();
        self.clear_refresh_token();
    }

    /// Stores a token and reads it back, browsers silently drop cookies they refuse
    fn write(&self, name: &str, token: &str, options: &CookieOptions) -> Result<(), ClientError> {
        self.cookies.set(name, token, options)?;

        if self.read(name).is_none() {
            tracing::error!("Failed to set {} - token not found after setting", name);
            return Err(ClientError::Storage(format!("{} was not stored", name)));
        }

        tracing::debug!("Stored {} {}", name, redact(token));
        Ok(())
    }

    fn read(&self, name: &str) -> Option<String> {
        match self.cookies.get(name) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", name, e);
                None
            }
        }
    }

    fn delete(&self, name: &str) {
        if let Err(e) = self.cookies.remove(name, "/") {
            tracing::error!("Failed to clear {}: {}", name, e);
        }
    }
}
