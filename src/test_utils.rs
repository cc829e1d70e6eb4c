//! In-memory `CourseStore` for unit and integration tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::db::CourseStore;
use crate::errors::GatewayError;
use crate::models::{NewCourse, StoredCourse};

#[derive(Default)]
struct StoreState {
    courses: Vec<StoredCourse>,
    next_id: u64,
    insert_calls: usize,
    delete_calls: usize,
    fetch_calls: usize,
}

/// Keeps courses in a `Vec` and can be told to fail specific calls
#[derive(Default)]
pub struct InMemoryCourseStore {
    state: Mutex<StoreState>,
    failing_codes: HashSet<String>,
    failing_ids: HashSet<String>,
    fail_fetches: bool,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `count` generic courses with ids `doc-0`, `doc-1`, ...
    pub fn with_courses(count: usize) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            for i in 0..count {
                state.courses.push(StoredCourse {
                    id: format!("doc-{}", i),
                    code: Some(format!("TEST{:03}", i)),
                    name: Some(format!("Test Course {}", i)),
                    description: None,
                    category: None,
                    created_at: Some(Utc::now()),
                });
            }
            state.next_id = count as u64;
        }
        store
    }

    /// Inserts of courses with these codes fail
    pub fn failing_inserts_for(mut self, codes: &[&str]) -> Self {
        self.failing_codes = codes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Deletes of these document ids fail
    pub fn failing_deletes_for(mut self, ids: &[&str]) -> Self {
        self.failing_ids = ids.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn failing_fetches(mut self) -> Self {
        self.fail_fetches = true;
        self
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn courses(&self) -> Vec<StoredCourse> {
        self.state.lock().unwrap().courses.clone()
    }

    pub fn insert_calls(&self) -> usize {
        self.state.lock().unwrap().insert_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.state.lock().unwrap().delete_calls
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_calls
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn insert_course(&self, course: &NewCourse) -> Result<String, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.insert_calls += 1;
        if self.failing_codes.contains(&course.code) {
            return Err(GatewayError::unavailable("insert", format!("refused {}", course.code)));
        }

        let id = format!("doc-{}", state.next_id);
        state.next_id += 1;
        state.courses.push(StoredCourse {
            id: id.clone(),
            code: Some(course.code.clone()),
            name: Some(course.name.clone()),
            description: Some(course.description.clone()),
            category: Some(course.category.clone()),
            created_at: Some(Utc::now()),
        });
        Ok(id)
    }

    async fn fetch_courses(&self, limit: Option<usize>) -> Result<Vec<StoredCourse>, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_calls += 1;
        if self.fail_fetches {
            return Err(GatewayError::unavailable("list", "database offline"));
        }
        let take = limit.unwrap_or(usize::MAX);
        Ok(state.courses.iter().take(take).cloned().collect())
    }

    async fn delete_course(&self, id: &str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls += 1;
        if self.failing_ids.contains(id) {
            return Err(GatewayError::unavailable("delete", format!("refused {}", id)));
        }
        state.courses.retain(|c| c.id != id);
        Ok(())
    }
}
