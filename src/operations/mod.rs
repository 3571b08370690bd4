//! Operations over parsed records used by the CLI.
//!
//! The parsing core only produces [`crate::models::AcademicRecord`] values;
//! everything that touches the store or the filesystem lives here.

pub mod batch;
pub mod catalog;
pub mod import;
pub mod recommend;

pub use batch::{parse_directory, BatchEntry};
pub use catalog::{load_catalog, store_catalog, CatalogSummary};
pub use import::{import_file, import_record, ImportOutcome, ImportSummary};
pub use recommend::{rank_electives, recommend_electives, Recommendation};
