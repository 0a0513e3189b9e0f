use std::fmt;

/// Custom error type for shop API and artifact operations
#[derive(Debug)]
pub enum ShopError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// Credentials not found in any source
    CredentialsNotFound(String),
    /// Failed to read or parse the credentials file
    Credentials(String),
    /// JSON parsing error
    Json(String),
    /// Failed to write an artifact to local storage
    Write(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::Http(e) => write!(f, "HTTP request failed: {}", e),
            ShopError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            ShopError::CredentialsNotFound(msg) => write!(f, "{}", msg),
            ShopError::Credentials(msg) => write!(f, "{}", msg),
            ShopError::Json(msg) => write!(f, "JSON error: {}", msg),
            ShopError::Write(msg) => write!(f, "Artifact write failed: {}", msg),
            ShopError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ShopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShopError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ShopError {
    fn from(err: reqwest::Error) -> Self {
        ShopError::Http(err)
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        ShopError::Json(err.to_string())
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::Write(err.to_string())
    }
}

impl From<std::env::VarError> for ShopError {
    fn from(err: std::env::VarError) -> Self {
        ShopError::Config(err.to_string())
    }
}

/// Result type alias for shop operations
pub type Result<T> = std::result::Result<T, ShopError>;
