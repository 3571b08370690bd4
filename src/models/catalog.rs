use serde::{Deserialize, Serialize};

/// Elective type excluded from recommendations.
pub const SOCIOHUMANISTIC: &str = "Sociohumanistic";
/// Elective type assumed when a course does not declare one.
pub const DEFAULT_ELECTIVE_TYPE: &str = "Professional";

/// A curriculum course with its prerequisite edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub elective: bool,
    #[serde(default)]
    pub elective_type: Option<String>,
    #[serde(default)]
    pub min_credits_required: Option<u32>,
    /// Ids of the courses this one directly requires.
    #[serde(default)]
    pub requires: Vec<String>,
}

impl CatalogCourse {
    /// Elective type, defaulting to [`DEFAULT_ELECTIVE_TYPE`].
    #[must_use]
    pub fn effective_elective_type(&self) -> &str {
        self.elective_type.as_deref().unwrap_or(DEFAULT_ELECTIVE_TYPE)
    }
}

/// Catalog file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<CatalogCourse>,
}

/// A stored student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredStudent {
    pub student_id: String,
    pub name: String,
    pub overall_average: Option<f64>,
    pub approved_credits: Option<u32>,
}

/// A stored student→course relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TookRecord {
    pub course_id: String,
    pub semester_taken: String,
    pub grade: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_defaults() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"courses": [{"id": "1155101", "name": "Cálculo"}]}"#)
                .unwrap();
        let c = &catalog.courses[0];
        assert!(!c.elective);
        assert!(c.requires.is_empty());
        assert_eq!(c.credits, None);
        assert_eq!(c.effective_elective_type(), "Professional");
    }

    #[test]
    fn catalog_full_entry() {
        let json = r#"{"courses": [{
            "id": "1155801", "name": "Inteligencia Artificial", "credits": 3,
            "elective": true, "electiveType": "Sociohumanistic",
            "minCreditsRequired": 100, "requires": ["1155101", "1155201"]
        }]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let c = &catalog.courses[0];
        assert!(c.elective);
        assert_eq!(c.effective_elective_type(), SOCIOHUMANISTIC);
        assert_eq!(c.min_credits_required, Some(100));
        assert_eq!(c.requires, ["1155101", "1155201"]);
    }
}
