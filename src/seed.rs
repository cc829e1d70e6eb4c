use tracing::{error, info};

use crate::db::CourseStore;
use crate::errors::GatewayError;
use crate::models::{CatalogEntry, NewCourse};

#[derive(Debug, Clone)]
pub struct SeededCourse {
    pub code: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug)]
pub struct SeedFailure {
    pub code: String,
    pub name: String,
    pub error: GatewayError,
}

/// Outcome of a populate run. Inserts are independent, so a run can end
/// with both successes and failures.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub inserted: Vec<SeededCourse>,
    pub failures: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn attempted(&self) -> usize {
        self.inserted.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Number of courses already in the collection
pub async fn existing_course_count<S>(store: &S) -> Result<usize, GatewayError>
where
    S: CourseStore + ?Sized,
{
    store.count_courses().await
}

/// Insert every catalog entry, one request each, carrying on past failures.
pub async fn seed_courses<S>(store: &S, catalog: &[CatalogEntry]) -> SeedReport
where
    S: CourseStore + ?Sized,
{
    let mut report = SeedReport::default();

    for entry in catalog {
        let course = NewCourse::from(entry);
        match store.insert_course(&course).await {
            Ok(id) => {
                info!("Added course: {} with ID: {}", entry.name, id);
                report.inserted.push(SeededCourse {
                    code: entry.code.to_string(),
                    name: entry.name.to_string(),
                    id,
                });
            }
            Err(e) => {
                error!("Error adding course {} ({}): {}", entry.name, entry.code, e);
                report.failures.push(SeedFailure {
                    code: entry.code.to_string(),
                    name: entry.name.to_string(),
                    error: e,
                });
            }
        }
    }

    info!(
        "Seeding finished: {} added, {} failed",
        report.inserted.len(),
        report.failures.len()
    );
    report
}
