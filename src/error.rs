use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    // Configuration errors
    #[error("Base URL could not be resolved: {0}")]
    BaseUrlNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Network-specific errors
    #[error("Network timeout while contacting: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // Response validation and decoding errors
    #[error("Server returned HTTP {status} (URL: {url}): {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Failed to decode response body: {message} (URL: {url})")]
    BodyDecode { url: String, message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Config file plumbing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl ApiError {
    /// Create a base-URL resolution error with context
    pub fn base_url_not_found(msg: impl Into<String>) -> Self {
        Self::BaseUrlNotFound(msg.into())
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error (4xx/5xx responses)
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create a body decode error (malformed or unexpected JSON)
    pub fn body_decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BodyDecode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Returns the HTTP status code if this is a status error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
