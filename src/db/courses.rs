use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::values::{decode_course, encode_course, FirestoreDocument, CREATED_AT_FIELD};
use super::{CourseStore, Database};
use crate::errors::GatewayError;
use crate::models::{NewCourse, StoredCourse};

/// Largest page requested from the list endpoint
pub const MAX_PAGE_SIZE: usize = 300;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    write_results: Vec<Value>,
}

impl Database {
    /// Creates a course document with a fresh id and a server-side
    /// `createdAt` timestamp.
    pub async fn create_course(&self, course: &NewCourse) -> Result<String, GatewayError> {
        let id = Uuid::new_v4().simple().to_string();
        let body = json!({
            "writes": [{
                "update": {
                    "name": self.document_name(&id),
                    "fields": encode_course(course),
                },
                "updateTransforms": [{
                    "fieldPath": CREATED_AT_FIELD,
                    "setToServerValue": "REQUEST_TIME",
                }],
                "currentDocument": { "exists": false },
            }]
        });

        let response = self
            .send("insert", self.client.post(self.commit_url()).json(&body))
            .await?;
        let commit: CommitResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::malformed("insert", e.to_string()))?;
        if commit.write_results.is_empty() {
            return Err(GatewayError::malformed("insert", "commit returned no write results"));
        }

        debug!("Created course {} as {}", course.code, id);
        Ok(id)
    }

    /// Lists course documents page by page, stopping early once `limit`
    /// documents have been collected.
    pub async fn list_courses(&self, limit: Option<usize>) -> Result<Vec<StoredCourse>, GatewayError> {
        let mut courses = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let remaining = limit.map(|l| l.saturating_sub(courses.len()));
            if remaining == Some(0) {
                break;
            }
            let page_size = remaining.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE);

            let mut request = self
                .client
                .get(self.collection_url())
                .query(&[("pageSize", page_size.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let page: ListDocumentsResponse = self
                .send("list", request)
                .await?
                .json()
                .await
                .map_err(|e| GatewayError::malformed("list", e.to_string()))?;

            debug!("Fetched page of {} course documents", page.documents.len());
            courses.extend(page.documents.iter().map(decode_course));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if let Some(limit) = limit {
            courses.truncate(limit);
        }
        info!("Listed {} courses from {}", courses.len(), self.collection);
        Ok(courses)
    }

    pub async fn remove_course(&self, id: &str) -> Result<(), GatewayError> {
        self.send("delete", self.client.delete(self.document_url(id)))
            .await?;
        debug!("Deleted course document {}", id);
        Ok(())
    }
}

#[async_trait]
impl CourseStore for Database {
    async fn insert_course(&self, course: &NewCourse) -> Result<String, GatewayError> {
        self.create_course(course).await
    }

    async fn fetch_courses(&self, limit: Option<usize>) -> Result<Vec<StoredCourse>, GatewayError> {
        self.list_courses(limit).await
    }

    async fn delete_course(&self, id: &str) -> Result<(), GatewayError> {
        self.remove_course(id).await
    }
}
