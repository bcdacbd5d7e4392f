use serde::{Deserialize, Serialize};

/// The response body returned when an API request fails
///
/// The API reports failures under either `error` or `message`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    /// The error message
    #[serde(alias = "message")]
    pub error: String,
}
