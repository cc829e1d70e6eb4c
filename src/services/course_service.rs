use tracing::{error, info, warn};

use crate::db::CourseStore;
use crate::errors::GatewayError;
use crate::models::{CatalogEntry, NewCourse, StoredCourse};
use crate::seed::{self, SeedReport};

/// Most documents removed by one delete-all run
pub const DELETE_BATCH_LIMIT: usize = 500;

/// What the operator must type to confirm delete-all
pub const DELETE_CONFIRMATION: &str = "DELETE";

pub fn confirms_delete(input: &str) -> bool {
    input == DELETE_CONFIRMATION
}

#[derive(Debug)]
pub struct DeleteFailure {
    pub id: String,
    pub error: GatewayError,
}

#[derive(Debug, Default)]
pub struct DeleteReport {
    pub fetched: usize,
    pub deleted: usize,
    pub failures: Vec<DeleteFailure>,
    /// The batch was full, so more documents may remain
    pub limit_reached: bool,
}

/// Course operations over an injected store
pub struct CourseService<'a, S: CourseStore + ?Sized> {
    store: &'a S,
    delete_batch_limit: usize,
}

impl<'a, S: CourseStore + ?Sized> CourseService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            delete_batch_limit: DELETE_BATCH_LIMIT,
        }
    }

    /// Lower the delete batch size; values above `DELETE_BATCH_LIMIT` are capped
    pub fn with_delete_batch_limit(mut self, limit: usize) -> Self {
        self.delete_batch_limit = limit.clamp(1, DELETE_BATCH_LIMIT);
        self
    }

    pub async fn list_courses(&self) -> Result<Vec<StoredCourse>, GatewayError> {
        self.store.fetch_courses(None).await
    }

    pub async fn add_course(&self, course: &NewCourse) -> Result<String, GatewayError> {
        match self.store.insert_course(course).await {
            Ok(id) => {
                info!("Added course {} ({}) with ID {}", course.name, course.code, id);
                Ok(id)
            }
            Err(e) => {
                error!("Failed to add course {} ({}): {}", course.name, course.code, e);
                Err(e)
            }
        }
    }

    pub async fn existing_course_count(&self) -> Result<usize, GatewayError> {
        seed::existing_course_count(self.store).await
    }

    pub async fn populate(&self, catalog: &[CatalogEntry]) -> SeedReport {
        seed::seed_courses(self.store, catalog).await
    }

    /// Fetch one batch and delete each document in it. Individual delete
    /// failures are collected; only a failed fetch aborts the run.
    pub async fn delete_batch(&self) -> Result<DeleteReport, GatewayError> {
        let limit = self.delete_batch_limit;
        let courses = self.store.fetch_courses(Some(limit)).await?;

        let mut report = DeleteReport {
            fetched: courses.len(),
            limit_reached: courses.len() >= limit,
            ..DeleteReport::default()
        };

        for course in courses {
            match self.store.delete_course(&course.id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!("Failed to delete course document {}: {}", course.id, e);
                    report.failures.push(DeleteFailure { id: course.id, error: e });
                }
            }
        }

        info!(
            "Deleted {} of {} fetched course documents (limit {})",
            report.deleted, report.fetched, limit
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::InMemoryCourseStore;

    #[test]
    fn test_confirmation_must_match_exactly() {
        assert!(confirms_delete("DELETE"));
        assert!(!confirms_delete("delete"));
        assert!(!confirms_delete("DELETE "));
        assert!(!confirms_delete(" DELETE"));
        assert!(!confirms_delete(""));
        assert!(!confirms_delete("y"));
    }

    #[tokio::test]
    async fn test_delete_batch_removes_everything_under_limit() {
        let store = InMemoryCourseStore::with_courses(12);
        let report = CourseService::new(&store).delete_batch().await.unwrap();

        assert_eq!(report.fetched, 12);
        assert_eq!(report.deleted, 12);
        assert!(!report.limit_reached);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_batch_stops_at_limit() {
        let store = InMemoryCourseStore::with_courses(DELETE_BATCH_LIMIT + 20);
        let report = CourseService::new(&store).delete_batch().await.unwrap();

        assert_eq!(report.deleted, DELETE_BATCH_LIMIT);
        assert!(report.limit_reached);
        assert_eq!(store.delete_calls(), DELETE_BATCH_LIMIT);
        assert_eq!(store.len(), 20);
    }

    #[tokio::test]
    async fn test_delete_batch_exactly_at_limit_reports_possible_remainder() {
        let store = InMemoryCourseStore::with_courses(5);
        let report = CourseService::new(&store)
            .with_delete_batch_limit(5)
            .delete_batch()
            .await
            .unwrap();

        assert_eq!(report.deleted, 5);
        assert!(report.limit_reached);
    }

    #[tokio::test]
    async fn test_delete_batch_collects_failures() {
        let store = InMemoryCourseStore::with_courses(4).failing_deletes_for(&["doc-1"]);
        let report = CourseService::new(&store).delete_batch().await.unwrap();

        assert_eq!(report.deleted, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, "doc-1");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_batch_fetch_failure_is_an_error() {
        let store = InMemoryCourseStore::with_courses(3).failing_fetches();
        assert!(CourseService::new(&store).delete_batch().await.is_err());
        assert_eq!(store.delete_calls(), 0);
    }

    #[test]
    fn test_batch_limit_is_capped() {
        let store = InMemoryCourseStore::new();
        let service = CourseService::new(&store).with_delete_batch_limit(10_000);
        assert_eq!(service.delete_batch_limit, DELETE_BATCH_LIMIT);
        let service = CourseService::new(&store).with_delete_batch_limit(0);
        assert_eq!(service.delete_batch_limit, 1);
    }

    #[tokio::test]
    async fn test_add_course_returns_generated_id() {
        let store = InMemoryCourseStore::new();
        let service = CourseService::new(&store);
        let id = service
            .add_course(&NewCourse::from_code_and_name("ELCT801", "Electronics"))
            .await
            .unwrap();

        let courses = service.list_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, id);
        assert_eq!(courses[0].category.as_deref(), Some("ELCT8"));
    }
}
