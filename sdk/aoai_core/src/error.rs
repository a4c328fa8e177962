use thiserror::Error;

/// Errors that can occur when interacting with an Azure OpenAI resource.
#[derive(Error, Debug)]
pub enum AoaiError {
    /// The request failed due to an HTTP error.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Credential construction or token acquisition failed.
    ///
    /// Always surfaced before any request is attempted.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// The API returned an error response.
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    /// A request builder was finished without a required field.
    #[error("Builder error: {0}")]
    Builder(String),
}

impl AoaiError {
    pub(crate) fn invalid_endpoint(message: &str, source: url::ParseError) -> Self {
        Self::InvalidEndpoint(format!("{message}: {source}"))
    }
}

/// Result type alias for Azure OpenAI operations.
pub type AoaiResult<T> = std::result::Result<T, AoaiError>;
