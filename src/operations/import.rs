//! Persisting parsed records.

use std::path::Path;

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, TranscriptError};
use crate::ingest::{decode_transcript, hasher};
use crate::models::AcademicRecord;
use crate::parse::{parse_transcript, semester_key};

/// Result of storing one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub student_id: String,
    pub semesters: usize,
    /// Number of took relationships written (inserted or updated).
    pub courses_stored: usize,
}

/// Result of importing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Imported(ImportSummary),
    /// The same document content was imported before.
    Unchanged { hash: String },
}

/// Store a record: the student plus one took relationship per course.
///
/// Re-importing the same record is idempotent on
/// `(student, course, semester key)`; the grade of an existing relationship
/// is overwritten.
pub fn import_record(db: &Database, record: &AcademicRecord) -> Result<ImportSummary> {
    store_record(db, record, None)
}

/// Store `record` and, when given, the hash of the document it came from.
/// Both land in one transaction.
fn store_record(
    db: &Database,
    record: &AcademicRecord,
    document_hash: Option<&str>,
) -> Result<ImportSummary> {
    let header = &record.header;
    let student_id = match header.student_code.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => {
            tracing::warn!("record has no student code, not stored");
            return Err(TranscriptError::IncompleteStudent {
                missing: "studentCode",
            });
        }
    };
    let name = match header.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => {
            tracing::warn!(student_id, "record has no student name, not stored");
            return Err(TranscriptError::IncompleteStudent { missing: "name" });
        }
    };

    let courses_stored = db.in_transaction(|db| {
        db.upsert_student(
            student_id,
            name,
            header.overall_average,
            header.approved_credits_from_curriculum,
        )?;

        let mut stored = 0;
        for semester in &record.semesters {
            for course in &semester.courses {
                let key = semester_key(&semester.period_label, course.grade_kind);
                db.upsert_took(student_id, &course.code, &key, course.final_grade)?;
                stored += 1;
            }
        }
        if let Some(hash) = document_hash {
            db.record_document(hash, student_id)?;
        }
        Ok(stored)
    })?;

    tracing::info!(
        student_id,
        semesters = record.semesters.len(),
        courses_stored,
        "record imported"
    );

    Ok(ImportSummary {
        student_id: student_id.to_string(),
        semesters: record.semesters.len(),
        courses_stored,
    })
}

/// Import a transcript document (PDF or text) or a record serialized as
/// JSON. Documents whose content hash was already imported are skipped.
pub fn import_file(db: &Database, path: &Path) -> Result<ImportOutcome> {
    let bytes = std::fs::read(path)?;
    let hash = hasher::hash_bytes(&bytes);
    if db.document_imported(&hash)? {
        tracing::debug!(path = %path.display(), "document already imported");
        return Ok(ImportOutcome::Unchanged { hash });
    }

    let record = load_record(path, bytes)?;
    let summary = store_record(db, &record, Some(&hash))?;
    Ok(ImportOutcome::Imported(summary))
}

fn load_record(path: &Path, bytes: Vec<u8>) -> Result<AcademicRecord> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        return serde_json::from_slice(&bytes).map_err(|e| TranscriptError::Parse {
            path: path.to_string_lossy().into(),
            detail: format!("invalid record JSON: {e}"),
        });
    }

    let text = decode_transcript(path, bytes)?;
    Ok(parse_transcript(&text))
}
