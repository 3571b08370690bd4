//! Parsing every transcript under a directory.

use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::ingest::{decode_transcript, hasher, DocumentFormat, ScannedFile, Scanner};
use crate::models::AcademicRecord;
use crate::parse::parse_transcript;

/// Outcome for one discovered document.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub file: String,
    pub format: DocumentFormat,
    /// Content hash, as stored by `import` for the same document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AcademicRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Discover transcripts under `root` and parse them in parallel.
///
/// Entries come back in discovery order (sorted by relative path). A document
/// that cannot be read yields an entry with `error` set; it never aborts the
/// batch. `exclude` filters discovered paths, relative to `root`, before
/// parsing.
pub fn parse_directory(
    root: &Path,
    max_file_size_mb: u32,
    exclude: impl Fn(&Path) -> bool,
) -> Result<Vec<BatchEntry>> {
    let files: Vec<ScannedFile> = Scanner::with_max_file_size(root, max_file_size_mb)
        .scan()?
        .into_iter()
        .filter(|f| !exclude(Path::new(&f.relative_path)))
        .collect();

    tracing::debug!(documents = files.len(), "batch parse started");

    let entries = files.par_iter().map(parse_file).collect();
    Ok(entries)
}

fn parse_file(file: &ScannedFile) -> BatchEntry {
    let mut entry = BatchEntry {
        file: file.relative_path.clone(),
        format: file.format,
        hash: None,
        record: None,
        error: None,
    };

    let text = std::fs::read(&file.path)
        .map_err(Into::into)
        .and_then(|bytes| {
            entry.hash = Some(hasher::hash_bytes(&bytes));
            decode_transcript(&file.path, bytes)
        });

    match text {
        Ok(text) => entry.record = Some(parse_transcript(&text)),
        Err(e) => {
            tracing::warn!(file = %file.relative_path, error = %e, "document skipped");
            entry.error = Some(e.to_string());
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TRANSCRIPT: &str = "Código: 1090123\nNombre: Ana Torres\nPromedio: 4.20\n\
        Primer período de 2020\n1155101 Cálculo Diferencial Definitiva 4.5 -\n";

    #[test]
    fn parses_documents_in_path_order() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("2020")).unwrap();
        fs::write(tmp.path().join("2020/b.txt"), TRANSCRIPT).unwrap();
        fs::write(tmp.path().join("a.txt"), TRANSCRIPT).unwrap();
        fs::write(tmp.path().join("notes.md"), "not a transcript").unwrap();

        let entries = parse_directory(tmp.path(), 0, |_| false).unwrap();
        let files: Vec<_> = entries.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, ["2020/b.txt", "a.txt"]);

        let record = entries[0].record.as_ref().unwrap();
        assert_eq!(record.header.student_code.as_deref(), Some("1090123"));
        assert_eq!(record.course_count(), 1);
        assert_eq!(entries[0].format, DocumentFormat::Text);
    }

    #[test]
    fn entries_carry_the_import_hash() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), TRANSCRIPT).unwrap();
        fs::write(tmp.path().join("broken.pdf"), b"not a pdf").unwrap();

        let entries = parse_directory(tmp.path(), 0, |_| false).unwrap();
        assert_eq!(
            entries[0].hash.as_deref(),
            Some(hasher::hash_bytes(TRANSCRIPT.as_bytes()).as_str())
        );
        assert_eq!(entries[1].format, DocumentFormat::Pdf);
        assert_eq!(
            entries[1].hash.as_deref(),
            Some(hasher::hash_bytes(b"not a pdf").as_str())
        );
        assert!(entries[1].error.is_some());
    }

    #[test]
    fn unreadable_document_becomes_error_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.pdf"), b"not a pdf").unwrap();
        fs::write(tmp.path().join("latin1.txt"), [0xC1, 0x6E, 0x61]).unwrap();

        let entries = parse_directory(tmp.path(), 0, |_| false).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.record.is_none() && e.error.is_some()));
    }

    #[test]
    fn exclusion_filter_applies() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("old")).unwrap();
        fs::write(tmp.path().join("old/a.txt"), TRANSCRIPT).unwrap();
        fs::write(tmp.path().join("b.txt"), TRANSCRIPT).unwrap();

        let entries = parse_directory(tmp.path(), 0, |p| {
            p.components().any(|c| c.as_os_str() == "old")
        })
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file, "b.txt");
    }
}
