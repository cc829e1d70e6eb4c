use thiserror::Error;

use super::AuthError;

/// Errors returned by a `CourseStore` operation
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned status {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[error("Malformed response from {operation}: {message}")]
    MalformedResponse {
        operation: &'static str,
        message: String,
    },

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Raised by in-memory stores used in tests
    #[error("{operation} failed: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },
}

impl GatewayError {
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }

    pub fn malformed<S: Into<String>>(operation: &'static str, message: S) -> Self {
        Self::MalformedResponse { operation, message: message.into() }
    }

    pub fn unavailable<S: Into<String>>(operation: &'static str, message: S) -> Self {
        Self::Unavailable { operation, message: message.into() }
    }

    /// HTTP status of the failed request, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Transport { .. } => "Could not reach the database".to_string(),
            GatewayError::Status { status, message, .. } => match status {
                401 | 403 => "Database rejected the credentials".to_string(),
                404 => "Database or collection not found".to_string(),
                _ => format!("Database returned HTTP {}: {}", status, message),
            },
            GatewayError::MalformedResponse { .. } => "Database returned an unexpected response".to_string(),
            GatewayError::Auth(e) => e.user_message(),
            GatewayError::Unavailable { message, .. } => message.clone(),
        }
    }
}
