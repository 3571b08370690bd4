//! Transcript text → [`AcademicRecord`].
//!
//! The input is the text of every page of one transcript joined with
//! newlines. The header is read from a fixed leading window; every line is
//! classified and fed, in order, to the semester builder. Malformed input
//! never fails: it yields absent fields, dropped rows and [`ParseIssue`]s.

pub mod builder;
pub mod classifier;
pub mod course;
pub mod header;
pub mod period;

use serde::Serialize;

use crate::models::{AcademicRecord, ParseIssue};

pub use builder::SemesterBuilder;
pub use classifier::{classify, LineClass};
pub use period::{normalize_period, semester_key};

/// A parsed record together with the non-fatal issues met along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub record: AcademicRecord,
    pub issues: Vec<ParseIssue>,
}

/// Parse transcript text into a structured record.
#[must_use]
pub fn parse_transcript(text: &str) -> AcademicRecord {
    parse_with_report(text).record
}

/// Parse transcript text, keeping the list of issues.
#[must_use]
pub fn parse_with_report(text: &str) -> ParseReport {
    let text = text.trim();
    if text.is_empty() {
        return ParseReport {
            record: AcademicRecord::default(),
            issues: vec![ParseIssue::EmptyInput],
        };
    }

    let lines: Vec<&str> = text.lines().collect();
    let mut issues = Vec::new();

    let header = header::extract_header(&lines, &mut issues);

    let mut builder = SemesterBuilder::new();
    for (idx, line) in lines.iter().enumerate() {
        builder.feed(idx + 1, classify(line));
    }
    let (semesters, line_issues) = builder.finish();
    issues.extend(line_issues);

    let record = AcademicRecord { header, semesters };
    tracing::debug!(
        semesters = record.semesters.len(),
        courses = record.course_count(),
        issues = issues.len(),
        "transcript parsed"
    );

    ParseReport { record, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GradeKind, RemedialGrade};

    const SAMPLE: &str = "Código: 1090123
Nombre: Ana Torres
Promedio: 4.20 Créditos aprobados Pensum: 96
Primer período de 2020
1234567 Cálculo Diferencial Definitiva 4.5 -";

    #[test]
    fn parses_minimal_transcript() {
        let record = parse_transcript(SAMPLE);
        assert_eq!(record.header.student_code.as_deref(), Some("1090123"));
        assert_eq!(record.header.name.as_deref(), Some("Ana Torres"));
        assert_eq!(record.header.overall_average, Some(4.20));
        assert_eq!(record.header.approved_credits_from_curriculum, Some(96));

        assert_eq!(record.semesters.len(), 1);
        let sem = &record.semesters[0];
        assert_eq!(sem.period_label, "Primer período de 2020");
        assert_eq!(sem.courses.len(), 1);
        let c = &sem.courses[0];
        assert_eq!(c.code, "1234567");
        assert_eq!(c.title, "Cálculo Diferencial");
        assert_eq!(c.grade_kind, GradeKind::Definitive);
        assert_eq!(c.final_grade, 4.5);
        assert_eq!(c.remedial_grade, RemedialGrade::None);
    }

    #[test]
    fn empty_input_yields_empty_record() {
        for text in ["", "  \n\n  "] {
            let report = parse_with_report(text);
            assert!(report.record.header.is_empty());
            assert!(report.record.semesters.is_empty());
            assert_eq!(report.issues, vec![ParseIssue::EmptyInput]);
        }
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse_transcript(SAMPLE), parse_transcript(SAMPLE));
    }

    #[test]
    fn no_anchor_keeps_header() {
        let record = parse_transcript("Código: 1090123\n1234567 Cálculo Definitiva 4.5 -");
        assert!(record.semesters.is_empty());
        assert_eq!(record.header.student_code.as_deref(), Some("1090123"));
    }

    #[test]
    fn crlf_line_endings() {
        let record = parse_transcript(&SAMPLE.replace('\n', "\r\n"));
        assert_eq!(record.semesters[0].courses.len(), 1);
        assert_eq!(record.header.name.as_deref(), Some("Ana Torres"));
    }
}
