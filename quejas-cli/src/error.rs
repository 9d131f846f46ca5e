//! CLI Error Types

use quejas_client::ClientError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// API connection error
    #[error("API connection error: {message}")]
    ConnectionError { message: String },

    /// API request failed
    #[error("API request failed: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Not logged in, or the session expired
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Server error
    #[error("Server error: {message}")]
    ServerError { message: String },

    /// Local validation failed
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// Upload failed
    #[error("Upload failed: {message}")]
    UploadError { message: String },

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an upload error
    pub fn upload(message: impl Into<String>) -> Self {
        CliError::UploadError {
            message: message.into(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigError { .. } => 1,
            CliError::InvalidArgument { .. } => 2,
            CliError::ConnectionError { .. } => 3,
            CliError::ApiError { .. } => 4,
            CliError::IoError(_) => 5,
            CliError::JsonError(_) => 6,
            CliError::ValidationError { .. } => 7,
            CliError::Unauthorized { .. } => 10,
            CliError::NotFound { .. } => 21,
            CliError::UploadError { .. } => 22,
            CliError::ServerError { .. } => 30,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation { message } => CliError::ValidationError { message },
            ClientError::Unauthorized { message } | ClientError::Forbidden { message } => {
                CliError::Unauthorized { message }
            }
            ClientError::NotFound { message } => CliError::NotFound { message },
            ClientError::Server { message } => CliError::ServerError { message },
            ClientError::Api { status, message } => CliError::ApiError { status, message },
            ClientError::Transport { message } => CliError::ConnectionError { message },
            ClientError::Request { message } | ClientError::Config { message } => {
                CliError::ConfigError { message }
            }
            ClientError::Decode { message } => CliError::ApiError {
                status: 200,
                message: format!("Unexpected response: {}", message),
            },
            ClientError::Upload { message } => CliError::UploadError { message },
            ClientError::Io(e) => CliError::IoError(e),
        }
    }
}
