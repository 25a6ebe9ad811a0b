//! Error types and handling for the `aurorawx` client library

use thiserror::Error;

/// Main error type for the aurora and zip code clients
#[derive(Error, Debug)]
pub enum AuroraError {
    /// Network, DNS, timeout or body read failure
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Non-success HTTP status from a remote API
    #[error("Remote error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// Response body could not be decoded as JSON
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Expected JSON field absent or malformed
    #[error("Missing or malformed field: {field}")]
    MissingField { field: String },

    /// The filtered image catalog was empty
    #[error("No images available in category '{category}'")]
    NoImagesAvailable { category: String },

    /// Download directory, temp file or rename failure
    #[error("Filesystem error: {source}")]
    Filesystem {
        #[from]
        source: std::io::Error,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AuroraError {
    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new remote status error
    pub fn remote<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new missing field error for a JSON path such as `wind.speed`
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn no_images<S: Into<String>>(category: S) -> Self {
        Self::NoImagesAvailable {
            category: category.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AuroraError::Transport { .. } => {
                "Unable to reach the remote service. Please check your internet connection."
                    .to_string()
            }
            AuroraError::Remote { status, .. } => {
                format!("The remote service rejected the request (HTTP {status}).")
            }
            AuroraError::InvalidResponse { .. } | AuroraError::MissingField { .. } => {
                "The remote service returned data in an unexpected format.".to_string()
            }
            AuroraError::NoImagesAvailable { category } => {
                format!("No images are currently available in category '{category}'.")
            }
            AuroraError::Filesystem { .. } => {
                "File operation failed. Please check the download directory permissions."
                    .to_string()
            }
            AuroraError::Config { message } => format!("Configuration error: {message}"),
        }
    }
}

impl From<reqwest::Error> for AuroraError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        match err.status() {
            Some(status) => AuroraError::remote(status.as_u16(), err.to_string()),
            None => AuroraError::transport(err.to_string()),
        }
    }
}

impl From<tempfile::PersistError> for AuroraError {
    fn from(err: tempfile::PersistError) -> Self {
        AuroraError::Filesystem { source: err.error }
    }
}
