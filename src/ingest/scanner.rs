use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;

/// Source format of a transcript document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// PDF as issued by the registrar.
    Pdf,
    /// Text already extracted from a PDF.
    Text,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Detect the format from a path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Discovered transcript document.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub format: DocumentFormat,
}

/// Parallel transcript finder that respects .gitignore.
pub struct Scanner {
    root: PathBuf,
    /// Maximum file size in bytes (0 = unlimited).
    max_file_size_bytes: u64,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_size_bytes: 0,
        }
    }

    /// Create a scanner with a file size limit.
    pub fn with_max_file_size(root: impl Into<PathBuf>, max_size_mb: u32) -> Self {
        Self {
            root: root.into(),
            max_file_size_bytes: u64::from(max_size_mb) * 1024 * 1024,
        }
    }

    /// Walk the directory and return every transcript document, sorted by
    /// relative path. Size checks run in parallel.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let entries: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false)
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                !matches!(
                    name.as_ref(),
                    ".transcripts" | ".git" | "target" | "node_modules"
                )
            })
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| DocumentFormat::from_path(e.path()).is_some())
            .map(ignore::DirEntry::into_path)
            .collect();

        let root = &self.root;
        let max_size = self.max_file_size_bytes;
        let mut files: Vec<ScannedFile> = entries
            .par_iter()
            .filter_map(|path| {
                let size = path.metadata().ok()?.len();
                if max_size > 0 && size > max_size {
                    tracing::debug!(path = %path.display(), size, "skipping oversized document");
                    return None;
                }

                let relative = path
                    .strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/");
                Some(ScannedFile {
                    path: path.clone(),
                    relative_path: relative,
                    format: DocumentFormat::from_path(path)?,
                })
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }
}
