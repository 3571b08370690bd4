pub mod catalog;
pub mod issue;
pub mod record;

pub use catalog::{Catalog, CatalogCourse, StoredStudent, TookRecord};
pub use issue::{HeaderField, ParseIssue};
pub use record::{
    AcademicRecord, CourseRecord, GradeKind, RemedialGrade, SemesterBlock, StudentHeader,
};
