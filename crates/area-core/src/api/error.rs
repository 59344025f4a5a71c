use thiserror::Error;

/// Errors that can occur while talking to the playground backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing token. Set AREA_TOKEN or backend.token.")]
    MissingToken,

    #[error("Backend returned error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
