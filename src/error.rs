use crate::transport::TransportError;
use std::fmt;
use thiserror::Error;

/// Business error reported inside a structurally valid envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Short machine token (e.g. `"noent"`, `"invalid_token"`). Empty when the
    /// upstream omitted it.
    pub code: String,
    /// Human-readable message, verbatim.
    pub message: String,
    pub uid: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            uid: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed with error code '{}': {}", self.code, self.message)
    }
}

/// Unified error type for the client.
///
/// Variants follow the failure axes: configuration, transport, decoding,
/// HTTP status, and business errors (with sentinels for not-found, conflict
/// and authentication classes).
#[derive(Debug, Error)]
pub enum Error {
    #[error("app id is not set")]
    AppIdNotSet,

    #[error("private token is not set")]
    PrivateTokenNotSet,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("{context}: {source}")]
    Network {
        context: String,
        #[source]
        source: TransportError,
    },

    #[error("{context}: {source}")]
    Decoding {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed with status '{status}': server returned '{body}'")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Api(ApiError),

    #[error("not found: {0}")]
    NotFound(ApiError),

    #[error("conflict: {0}")]
    Conflict(ApiError),

    #[error("authentication required: {0}")]
    AuthRequired(ApiError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[source] Box<tokio_tungstenite::tungstenite::Error>),

    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn network(context: impl Into<String>, source: TransportError) -> Self {
        Error::Network {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn decoding(context: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decoding {
            context: context.into(),
            source,
        }
    }

    /// True for missing or invalid configuration; these are never retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::AppIdNotSet | Error::PrivateTokenNotSet | Error::Configuration { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// The business error payload, for any of the business variants.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) | Error::NotFound(e) | Error::Conflict(e) | Error::AuthRequired(e) => {
                Some(e)
            }
            _ => None,
        }
    }

    /// Upstream machine error code, if this is a business error.
    pub fn error_code(&self) -> Option<&str> {
        self.api_error().map(|e| e.code.as_str())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(e))
    }
}
