use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading credentials or minting access tokens
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Cannot read credentials file '{path}': {source}")]
    CredentialsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credentials file '{path}' is not a valid service account key: {source}")]
    CredentialsInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Service account key is missing '{field}'")]
    MissingField { field: &'static str },

    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Token endpoint returned status {status}: {message}")]
    TokenRejected { status: u16, message: String },
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::CredentialsUnreadable { path, .. } => {
                format!("Credentials file {} could not be read", path.display())
            }
            AuthError::CredentialsInvalid { path, .. } => {
                format!("Credentials file {} is not a service account key", path.display())
            }
            AuthError::MissingField { field } => format!("Credentials are missing '{}'", field),
            AuthError::Signing(_) => "Private key in credentials could not sign a token".to_string(),
            AuthError::Transport(_) => "Could not reach the token endpoint".to_string(),
            AuthError::TokenRejected { status, .. } => {
                format!("Token endpoint rejected the credentials (HTTP {})", status)
            }
        }
    }
}
