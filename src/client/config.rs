use chrono::Duration;

use crate::client::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

pub const ACCESS_TOKEN_EXPIRY_DAYS: i64 = 1;
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Runtime settings of the web client.
///
/// A wasm bundle has no process environment, so values are baked in at build time through
/// `AIEMAIL_*` variables and fall back to [`Config::default`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub secure_cookies: bool,
    pub access_token_expiry: Duration,
    pub refresh_token_expiry: Duration,
    /// How long the logout marker stays in shared storage before it is removed
    pub logout_marker_ttl: Duration,
    /// Delay between storing OAuth tokens and leaving the callback page
    pub callback_redirect_delay: Duration,
    /// How long a toast stays on screen
    pub toast_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            secure_cookies: false,
            access_token_expiry: Duration::days(ACCESS_TOKEN_EXPIRY_DAYS),
            refresh_token_expiry: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            logout_marker_ttl: Duration::milliseconds(100),
            callback_redirect_delay: Duration::milliseconds(100),
            toast_duration: Duration::seconds(4),
        }
    }
}

impl Config {
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("AIEMAIL_API_URL"),
            option_env!("AIEMAIL_SECURE_COOKIES"),
        )
    }

    fn from_values(
        api_base_url: Option<&str>,
        secure_cookies: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = api_base_url {
            let parsed = url::Url::parse(url).map_err(|e| ConfigError::InvalidBuildValue {
                var: "AIEMAIL_API_URL",
                reason: e.to_string(),
            })?;
            config.api_base_url = parsed.as_str().trim_end_matches('/').to_string();
        }

        if let Some(secure) = secure_cookies {
            config.secure_cookies = match secure {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(ConfigError::InvalidBuildValue {
                        var: "AIEMAIL_SECURE_COOKIES",
                        reason: format!("expected true or false, got {:?}", other),
                    })
                }
            };
        }

        Ok(config)
    }

    /// Absolute URL of an API path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
