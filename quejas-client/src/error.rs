//! Client Error Types
//!
//! Every failure the client can surface, classified the way the dashboard
//! reacts to it: local validation, the standard HTTP failure classes, and
//! transport-level problems where no response arrived at all.

use quejas_core::CoreError;
use thiserror::Error;

/// Client result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected locally before any request was made
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// 401; the stored token has been cleared
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// 403
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// 404
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 500
    #[error("Server error: {message}")]
    Server { message: String },

    /// Any other non-success status
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    /// The request was sent but no response arrived
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The request could not be built
    #[error("Invalid request: {message}")]
    Request { message: String },

    /// A response body did not match the expected shape
    #[error("Invalid response: {message}")]
    Decode { message: String },

    /// Upload pipeline failure
    #[error("Upload failed: {message}")]
    Upload { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
        }
    }

    /// Create a request construction error
    pub fn request(message: impl Into<String>) -> Self {
        ClientError::Request {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode {
            message: message.into(),
        }
    }

    /// Create an upload error
    pub fn upload(message: impl Into<String>) -> Self {
        ClientError::Upload {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        ClientError::Config {
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ClientError::Unauthorized { message },
            403 => ClientError::Forbidden { message },
            404 => ClientError::NotFound { message },
            500 => ClientError::Server { message },
            _ => ClientError::Api { status, message },
        }
    }

    /// HTTP status behind this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Forbidden { .. } => Some(403),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Server { .. } => Some(500),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The bare message, without the variant prefix
    ///
    /// For HTTP failures this is the backend's own message when it sent one.
    pub fn message(&self) -> String {
        match self {
            ClientError::Validation { message }
            | ClientError::Unauthorized { message }
            | ClientError::Forbidden { message }
            | ClientError::NotFound { message }
            | ClientError::Server { message }
            | ClientError::Api { message, .. }
            | ClientError::Transport { message }
            | ClientError::Request { message }
            | ClientError::Decode { message }
            | ClientError::Upload { message }
            | ClientError::Config { message } => message.clone(),
            ClientError::Io(e) => e.to_string(),
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        ClientError::validation(err.to_string())
    }
}
