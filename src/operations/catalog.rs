//! Course catalog loading.

use std::path::Path;

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, TranscriptError};
use crate::models::Catalog;

/// Result of loading a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub courses: usize,
    /// Prerequisite edges stored.
    pub requirements: usize,
}

/// Load a JSON catalog file into the store.
pub fn load_catalog(db: &Database, path: &Path) -> Result<CatalogSummary> {
    let content = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content).map_err(|e| TranscriptError::Parse {
        path: path.to_string_lossy().into(),
        detail: format!("invalid catalog: {e}"),
    })?;
    store_catalog(db, &catalog)
}

/// Upsert every course and replace its prerequisite edges.
pub fn store_catalog(db: &Database, catalog: &Catalog) -> Result<CatalogSummary> {
    let requirements = db.in_transaction(|db| {
        for course in &catalog.courses {
            db.upsert_course(course)?;
        }
        let mut edges = 0;
        for course in &catalog.courses {
            edges += db.replace_requirements(&course.id, &course.requires)?;
        }
        Ok(edges)
    })?;

    tracing::info!(
        courses = catalog.courses.len(),
        requirements,
        "catalog loaded"
    );

    Ok(CatalogSummary {
        courses: catalog.courses.len(),
        requirements,
    })
}
