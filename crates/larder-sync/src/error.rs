//! # Client Error Types
//!
//! Error types for gateway, store and configuration operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Gateway      │  │     Controller          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  FetchError     │  │  ChannelError           │ │
//! │  │  InvalidUrl     │  │  CreateError    │  │                         │ │
//! │  │  ConfigLoad...  │  │  UpdateError    │  │                         │ │
//! │  │  ConfigSave...  │  │  DeleteError    │  │                         │ │
//! │  │                 │  │  Transport      │  │                         │ │
//! │  │                 │  │  Decode         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Validation(FormErrors) - a form was rejected before any request       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The four gateway kinds mean "non-2xx response" and nothing more: no
//! 4xx/5xx split, no parsing of error bodies. The Store keeps only the
//! rendered message, so every variant carries plain data and is `Clone`.

use larder_core::FormErrors;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure the sync layer can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Gateway Errors
    // =========================================================================
    /// Listing the collection returned a non-success status.
    #[error("Failed to fetch food items (HTTP {status})")]
    FetchError { status: u16 },

    /// Creating a record returned a non-success status.
    #[error("Failed to create food item (HTTP {status})")]
    CreateError { status: u16 },

    /// Updating a record returned a non-success status.
    #[error("Failed to update food item {id} (HTTP {status})")]
    UpdateError { id: String, status: u16 },

    /// Deleting a record returned a non-success status.
    #[error("Failed to delete food item {id} (HTTP {status})")]
    DeleteError { id: String, status: u16 },

    /// The request never produced a response (DNS, refused connection, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("Unreadable response: {0}")]
    Decode(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// The form failed validation and was not submitted.
    #[error("{0}")]
    Validation(#[from] FormErrors),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Channel send/receive failed.
    #[error("Channel error: {0}")]
    ChannelError(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true for a non-success response or a failed round trip.
    pub fn is_gateway_error(&self) -> bool {
        matches!(
            self,
            ClientError::FetchError { .. }
                | ClientError::CreateError { .. }
                | ClientError::UpdateError { .. }
                | ClientError::DeleteError { .. }
                | ClientError::Transport(_)
                | ClientError::Decode(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// HTTP status of a non-success response, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::FetchError { status }
            | ClientError::CreateError { status }
            | ClientError::UpdateError { status, .. }
            | ClientError::DeleteError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
