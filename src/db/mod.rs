use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::{Authenticator, ServiceAccountKey};
use crate::config::Config;
use crate::errors::GatewayError;
use crate::models::{NewCourse, StoredCourse};

pub mod courses;
pub mod values;

/// Operations the menu needs from the course collection.
///
/// Each call is its own round trip; nothing here is atomic across calls.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Insert one course and return the generated document id
    async fn insert_course(&self, course: &NewCourse) -> Result<String, GatewayError>;

    /// Fetch courses, all of them when `limit` is `None`
    async fn fetch_courses(&self, limit: Option<usize>) -> Result<Vec<StoredCourse>, GatewayError>;

    async fn delete_course(&self, id: &str) -> Result<(), GatewayError>;

    async fn count_courses(&self) -> Result<usize, GatewayError> {
        Ok(self.fetch_courses(None).await?.len())
    }
}

/// Firestore collection accessed over the REST API
#[derive(Clone)]
pub struct Database {
    client: Client,
    auth: Arc<Authenticator>,
    base_url: String,
    project_id: String,
    collection: String,
}

impl Database {
    /// Connects using the credentials named by `config`, or the emulator when
    /// one is configured.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        let auth = if config.uses_emulator() {
            info!("Using Firestore emulator at {}", config.effective_base_url());
            Authenticator::emulator()
        } else {
            let key = ServiceAccountKey::from_file(&config.credentials_path)
                .with_context(|| format!("loading credentials from {}", config.credentials_path.display()))?;
            Authenticator::service_account(key, client.clone())
        };

        Self::with_authenticator(config, client, auth)
    }

    pub fn with_authenticator(config: &Config, client: Client, auth: Authenticator) -> Result<Self> {
        let project_id = config
            .project_id
            .clone()
            .or_else(|| auth.project_id().map(str::to_string))
            .ok_or_else(|| anyhow!("No project id: set FIREBASE_PROJECT_ID or use a key file with project_id"))?;

        debug!("Firestore project {} collection {}", project_id, config.collection);

        Ok(Self {
            client,
            auth: Arc::new(auth),
            base_url: config.effective_base_url(),
            project_id,
            collection: config.collection.clone(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// `projects/{project}/databases/(default)/documents`
    fn documents_root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, self.documents_root(), self.collection)
    }

    fn commit_url(&self) -> String {
        format!("{}/{}:commit", self.base_url, self.documents_root())
    }

    /// Full resource name of a document in the collection
    fn document_name(&self, id: &str) -> String {
        format!("{}/{}/{}", self.documents_root(), self.collection, id)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, self.document_name(id))
    }

    /// Attach a bearer token, send, and turn non-2xx answers into errors
    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response, GatewayError> {
        let token = self.auth.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GatewayError::transport(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                operation,
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response)
    }
}
