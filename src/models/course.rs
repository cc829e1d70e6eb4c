use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course known ahead of time and seeded by "populate"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
}

/// Fields written for a new course document. `createdAt` is assigned by the
/// server and therefore not part of this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

/// A course document as read back from the collection.
///
/// Every field except the id is optional because other clients may write
/// documents with a different shape into the same collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCourse {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Category is the part of the code before its first `0`, or the whole code.
pub fn derive_category(code: &str) -> String {
    match code.split_once('0') {
        Some((prefix, _)) => prefix.to_string(),
        None => code.to_string(),
    }
}

pub fn default_description(code: &str, name: &str) -> String {
    format!("This is the {} course with code {}.", name, code)
}

impl NewCourse {
    /// Build a course with derived category and description
    pub fn from_code_and_name(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            description: default_description(code, name),
            category: derive_category(code),
        }
    }

    /// Build a course from operator input; blank answers fall back to the
    /// derived values.
    pub fn with_overrides(code: &str, name: &str, description: Option<&str>, category: Option<&str>) -> Self {
        let mut course = Self::from_code_and_name(code, name);
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            course.description = description.to_string();
        }
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            course.category = category.to_string();
        }
        course
    }
}

impl From<&CatalogEntry> for NewCourse {
    fn from(entry: &CatalogEntry) -> Self {
        NewCourse::from_code_and_name(entry.code, entry.name)
    }
}

impl StoredCourse {
    /// One line per course in the listing
    pub fn summary_line(&self) -> String {
        format!(
            "ID: {} - {}: {}",
            self.id,
            self.code.as_deref().unwrap_or("<no code>"),
            self.name.as_deref().unwrap_or("<no name>")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_stops_at_first_zero() {
        assert_eq!(derive_category("PHTX831"), "PHTX831");
        assert_eq!(derive_category("BIOT502"), "BIOT5");
        assert_eq!(derive_category("PHTX051"), "PHTX");
        assert_eq!(derive_category("CHEM 102"), "CHEM 1");
        assert_eq!(derive_category("PHBT091"), "PHBT");
    }

    #[test]
    fn test_category_edge_cases() {
        assert_eq!(derive_category(""), "");
        assert_eq!(derive_category("0ABC"), "");
        assert_eq!(derive_category("ELCT"), "ELCT");
        assert_eq!(derive_category("A00"), "A");
    }

    #[test]
    fn test_description_contains_code_and_name() {
        let description = default_description("PHTX831", "Toxicology I");
        assert_eq!(description, "This is the Toxicology I course with code PHTX831.");
        assert_eq!(description, default_description("PHTX831", "Toxicology I"));
    }

    #[test]
    fn test_overrides_fall_back_when_blank() {
        let course = NewCourse::with_overrides("PHTX062", "Clinical Pharmacy II", Some(""), None);
        assert_eq!(course.category, "PHTX");
        assert_eq!(course.description, "This is the Clinical Pharmacy II course with code PHTX062.");

        let course = NewCourse::with_overrides("PHTX062", "Clinical Pharmacy II", Some("Custom"), Some("PHARM"));
        assert_eq!(course.category, "PHARM");
        assert_eq!(course.description, "Custom");
    }

    #[test]
    fn test_summary_line_handles_missing_fields() {
        let course = StoredCourse {
            id: "abc".to_string(),
            code: Some("PHTX831".to_string()),
            name: None,
            description: None,
            category: None,
            created_at: None,
        };
        assert_eq!(course.summary_line(), "ID: abc - PHTX831: <no name>");
    }
}
