use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::AuthError;

pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Bearer token accepted by the Firestore emulator
pub const EMULATOR_TOKEN: &str = "owner";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The parts of a Google service account key file we need
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path).map_err(|source| AuthError::CredentialsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&raw).map_err(|source| AuthError::CredentialsInvalid {
            path: path.to_path_buf(),
            source,
        })?;
        key.validate()?;
        Ok(key)
    }

    fn validate(&self) -> Result<(), AuthError> {
        if self.private_key.trim().is_empty() {
            return Err(AuthError::MissingField { field: "private_key" });
        }
        if self.client_email.trim().is_empty() {
            return Err(AuthError::MissingField { field: "client_email" });
        }
        if self.token_uri.trim().is_empty() {
            return Err(AuthError::MissingField { field: "token_uri" });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign the JWT that is traded for an access token at `token_uri`
pub fn create_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, AuthError> {
    let issued_at = now.timestamp();
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: DATASTORE_SCOPE.to_string(),
        aud: key.token_uri.clone(),
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    let token = encode(&header, &claims, &encoding_key)?;

    Ok(token)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

enum TokenSource {
    ServiceAccount {
        key: ServiceAccountKey,
        http_client: Client,
        cache: Mutex<Option<CachedToken>>,
    },
    Emulator,
}

/// Hands out bearer tokens for Firestore requests
pub struct Authenticator {
    source: TokenSource,
}

impl Authenticator {
    pub fn service_account(key: ServiceAccountKey, http_client: Client) -> Self {
        Self {
            source: TokenSource::ServiceAccount {
                key,
                http_client,
                cache: Mutex::new(None),
            },
        }
    }

    pub fn emulator() -> Self {
        Self { source: TokenSource::Emulator }
    }

    /// Project id carried by the key file, if any
    pub fn project_id(&self) -> Option<&str> {
        match &self.source {
            TokenSource::ServiceAccount { key, .. } => key.project_id.as_deref(),
            TokenSource::Emulator => None,
        }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        match &self.source {
            TokenSource::Emulator => Ok(EMULATOR_TOKEN.to_string()),
            TokenSource::ServiceAccount { key, http_client, cache } => {
                let mut cached = cache.lock().await;
                let now = Utc::now();
                if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
                    return Ok(token.access_token.clone());
                }

                let token = fetch_token(http_client, key, now).await?;
                let access_token = token.access_token.clone();
                *cached = Some(token);
                Ok(access_token)
            }
        }
    }
}

async fn fetch_token(client: &Client, key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<CachedToken, AuthError> {
    debug!("Requesting access token for {} from {}", key.client_email, key.token_uri);

    let assertion = create_assertion(key, now)?;
    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::TokenRejected {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }

    let body: TokenResponse = response.json().await?;
    let lifetime = body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
    info!("Obtained access token for {} (valid {}s)", key.client_email, lifetime);

    Ok(CachedToken {
        access_token: body.access_token,
        expires_at: now + Duration::seconds(lifetime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_token_freshness_respects_margin() {
        let now = Utc::now();
        let fresh = CachedToken {
            access_token: "a".to_string(),
            expires_at: now + Duration::seconds(600),
        };
        let stale = CachedToken {
            access_token: "b".to_string(),
            expires_at: now + Duration::seconds(30),
        };
        assert!(fresh.is_fresh(now));
        assert!(!stale.is_fresh(now));
    }

    #[tokio::test]
    async fn test_emulator_token() {
        let auth = Authenticator::emulator();
        assert_eq!(auth.access_token().await.unwrap(), EMULATOR_TOKEN);
        assert!(auth.project_id().is_none());
    }

    #[test]
    fn test_missing_key_file() {
        let err = ServiceAccountKey::from_file(Path::new("/nonexistent/firebase-key.json")).unwrap_err();
        assert!(matches!(err, AuthError::CredentialsUnreadable { .. }));
    }

    #[test]
    fn test_key_file_without_private_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"client_email": "svc@example.iam.gserviceaccount.com"}}"#).unwrap();
        let err = ServiceAccountKey::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AuthError::CredentialsInvalid { .. }));
    }

    #[test]
    fn test_key_file_with_blank_email() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"private_key": "pem", "client_email": " "}}"#).unwrap();
        let err = ServiceAccountKey::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AuthError::MissingField { field: "client_email" }));
    }

    #[test]
    fn test_token_uri_defaults_to_google() {
        let key: ServiceAccountKey =
            serde_json::from_str(r#"{"private_key": "pem", "client_email": "svc@example.com"}"#).unwrap();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
        assert!(key.project_id.is_none());
    }

    #[test]
    fn test_invalid_pem_is_a_signing_error() {
        let key = ServiceAccountKey {
            project_id: None,
            private_key_id: None,
            private_key: "not a pem".to_string(),
            client_email: "svc@example.com".to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        };
        let err = create_assertion(&key, Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }
}
