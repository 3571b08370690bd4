use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error in {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("incomplete student data: missing {missing}")]
    IncompleteStudent { missing: &'static str },

    #[error("student not found: {student_id}")]
    StudentNotFound { student_id: String },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
