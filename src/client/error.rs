//! Error types for the AIEmail web client.
//!
//! Failures fall into a few categories: network and API failures surfaced to the user as
//! toast notifications, malformed tokens raised from the JWT decode routine, and browser
//! storage failures which are logged and otherwise ignored.

use thiserror::Error;

/// Main error type for the web client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response (offline, CORS, DNS).
    #[error("Failed to send request: {0}")]
    Network(String),
    /// The API answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },
    /// The API rejected the bearer token.
    #[error("Request was not authorized, please sign in again")]
    Unauthorized,
    /// A response body or stored value could not be parsed.
    #[error("Failed to parse value: {0}")]
    Parse(String),
    /// A JWT could not be split or decoded.
    #[error("Invalid token")]
    InvalidToken,
    /// Cookie or localStorage access failed.
    #[error("Browser storage error: {0}")]
    Storage(String),
    /// A browser API the client depends on is not present (e.g. no `window`).
    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),
}

impl ClientError {
    /// Message suitable for a toast notification.
    ///
    /// API errors show the server's message verbatim, everything else a generic sentence so
    /// implementation details are kept out of the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { message, .. } if !message.is_empty() => message.clone(),
            Self::Request { .. } => "Something went wrong, please try again.".to_string(),
            Self::Network(_) => "Unable to reach the server, check your connection.".to_string(),
            Self::Unauthorized => self.to_string(),
            Self::InvalidToken => "Received an invalid session token.".to_string(),
            Self::Parse(_) | Self::Storage(_) | Self::Unavailable(_) => {
                "An unexpected error occurred.".to_string()
            }
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for build variable {var}: {reason}")]
    InvalidBuildValue { var: &'static str, reason: String },
}
