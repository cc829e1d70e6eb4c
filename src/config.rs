use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_COLLECTION: &str = "courses";
pub const DEFAULT_CREDENTIALS_PATH: &str = "firebase-key.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub project_id: Option<String>,
    pub collection: String,
    pub base_url: String,
    pub emulator_host: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            project_id: None,
            collection: DEFAULT_COLLECTION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            emulator_host: None,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            credentials_path: env::var("FIREBASE_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            project_id: env::var("FIREBASE_PROJECT_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            collection: env::var("FIRESTORE_COLLECTION")
                .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string()),
            base_url: env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            emulator_host: env::var("FIRESTORE_EMULATOR_HOST")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            timeout_seconds: env::var("FIRESTORE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.collection.trim().is_empty() {
            return Err(anyhow!("FIRESTORE_COLLECTION cannot be empty"));
        }
        if self.collection.contains('/') {
            return Err(anyhow!(
                "FIRESTORE_COLLECTION must be a top-level collection id, got '{}'",
                self.collection
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(anyhow!("FIRESTORE_TIMEOUT_SECONDS must be greater than zero"));
        }
        Url::parse(&self.effective_base_url())
            .map_err(|e| anyhow!("Invalid Firestore base URL '{}': {}", self.effective_base_url(), e))?;
        if self.emulator_host.is_some() && self.project_id.is_none() {
            return Err(anyhow!("FIREBASE_PROJECT_ID is required when FIRESTORE_EMULATOR_HOST is set"));
        }
        Ok(())
    }

    /// REST root actually used, taking the emulator override into account
    pub fn effective_base_url(&self) -> String {
        match &self.emulator_host {
            Some(host) => format!("http://{}/v1", host.trim_end_matches('/')),
            None => self.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn uses_emulator(&self) -> bool {
        self.emulator_host.is_some()
    }
}
