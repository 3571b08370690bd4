//! Course row matching and field extraction.
//!
//! A course row looks like
//! `1155101 Cálculo Diferencial Definitiva 4.5 -`: code, title, grade kind,
//! final grade and an optional remedial grade (`-` when there was none).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CourseRecord, GradeKind, RemedialGrade};

static COURSE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<code>\d{6,7})\s+(?P<title>.+?)\s+(?P<kind>Definitiva|Vacacional)\s+(?P<grade>[\d.]+)\s*(?P<remedial>-|[\d.]*)?\s*$",
    )
    .expect("valid regex")
});

/// Titles that mark an annotation printed in course-row shape.
const EXCLUDED_TITLES: &[&str] = &["matricula de honor", "beca de trabajo"];

/// Raw captures of a line that has the course row shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCourseRow<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub kind: &'a str,
    pub grade: &'a str,
    pub remedial: Option<&'a str>,
}

/// Why a course-shaped line did not become a [`CourseRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// The final grade token is not a finite decimal.
    InvalidGrade(String),
    /// Unknown grade kind token.
    InvalidKind(String),
    /// Honor roll or work scholarship annotation, not a course.
    Annotation(String),
}

impl RowRejection {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::InvalidGrade(token) => format!("final grade '{token}' is not a number"),
            Self::InvalidKind(token) => format!("unknown grade kind '{token}'"),
            Self::Annotation(title) => format!("annotation row '{title}'"),
        }
    }
}

/// Match `line` against the anchored course row shape.
#[must_use]
pub fn match_row(line: &str) -> Option<RawCourseRow<'_>> {
    let caps = COURSE_ROW_RE.captures(line)?;
    Some(RawCourseRow {
        code: caps.name("code")?.as_str(),
        title: caps.name("title")?.as_str(),
        kind: caps.name("kind")?.as_str(),
        grade: caps.name("grade")?.as_str(),
        remedial: caps.name("remedial").map(|m| m.as_str()),
    })
}

/// Turn matched captures into a course record, applying the exclusion rules.
pub fn parse_row(raw: RawCourseRow<'_>) -> Result<CourseRecord, RowRejection> {
    let grade_kind =
        GradeKind::from_token(raw.kind).ok_or_else(|| RowRejection::InvalidKind(raw.kind.into()))?;

    let final_grade = raw
        .grade
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite())
        .ok_or_else(|| RowRejection::InvalidGrade(raw.grade.into()))?;

    let title = raw.title.trim();
    if is_excluded_title(title) {
        return Err(RowRejection::Annotation(title.to_string()));
    }

    Ok(CourseRecord {
        code: raw.code.to_string(),
        title: title.to_string(),
        grade_kind,
        final_grade,
        remedial_grade: RemedialGrade::from_token(raw.remedial),
    })
}

/// Match and parse in one step; `None` if the line is not course-shaped.
#[must_use]
pub fn parse_line(line: &str) -> Option<Result<CourseRecord, RowRejection>> {
    match_row(line).map(parse_row)
}

fn is_excluded_title(title: &str) -> bool {
    let folded = title.to_lowercase();
    EXCLUDED_TITLES.iter().any(|t| folded.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> CourseRecord {
        parse_line(line)
            .expect("course shaped")
            .expect("valid course")
    }

    #[test]
    fn parses_full_row() {
        let c = parse_ok("1234567 Cálculo Diferencial Definitiva 4.5 -");
        assert_eq!(c.code, "1234567");
        assert_eq!(c.title, "Cálculo Diferencial");
        assert_eq!(c.grade_kind, GradeKind::Definitive);
        assert!((c.final_grade - 4.5).abs() < f64::EPSILON);
        assert_eq!(c.remedial_grade, RemedialGrade::None);
    }

    #[test]
    fn six_digit_code_and_remedial_decimal() {
        let c = parse_ok("115510 Física Mecánica Definitiva 2.4 3.2");
        assert_eq!(c.code, "115510");
        assert_eq!(c.remedial_grade, RemedialGrade::Decimal(3.2));
    }

    #[test]
    fn missing_remedial_is_none() {
        let c = parse_ok("1155203 Programación Orientada a Objetos Vacacional 3.8");
        assert_eq!(c.grade_kind, GradeKind::Vacational);
        assert_eq!(c.title, "Programación Orientada a Objetos");
        assert_eq!(c.remedial_grade, RemedialGrade::None);
    }

    #[test]
    fn unparseable_remedial_kept_as_text() {
        let c = parse_ok("1155203 Álgebra Lineal Definitiva 2.0 .");
        assert_eq!(c.remedial_grade, RemedialGrade::RawText(".".into()));
    }

    #[test]
    fn title_may_contain_grade_kind_words() {
        let c = parse_ok("1155999 Seminario Definitiva de Grado Definitiva 5.0 -");
        assert_eq!(c.title, "Seminario Definitiva de Grado");
    }

    #[test]
    fn code_length_is_enforced() {
        assert!(match_row("12345 Corto Definitiva 4.0 -").is_none());
        assert!(match_row("12345678 Largo Definitiva 4.0 -").is_none());
    }

    #[test]
    fn grade_kind_is_case_sensitive() {
        assert!(match_row("1234567 Química definitiva 4.0 -").is_none());
    }

    #[test]
    fn invalid_final_grade_rejected() {
        let result = parse_line("1234567 Química General Definitiva . -").unwrap();
        assert_eq!(result, Err(RowRejection::InvalidGrade(".".into())));

        let result = parse_line("1234567 Química General Definitiva 4.5.1 -").unwrap();
        assert!(matches!(result, Err(RowRejection::InvalidGrade(_))));
    }

    #[test]
    fn annotation_rows_excluded() {
        let result = parse_line("1234567 MATRICULA DE HONOR Definitiva 5.0 -").unwrap();
        assert!(matches!(result, Err(RowRejection::Annotation(_))));

        let result = parse_line("1234567 Beca de Trabajo Semestral Definitiva 0.0 -").unwrap();
        assert!(matches!(result, Err(RowRejection::Annotation(_))));
    }

    #[test]
    fn non_rows_do_not_match() {
        assert!(match_row("Primer período de 2020").is_none());
        assert!(match_row("Nombre: Ana Torres").is_none());
        assert!(match_row("1234567 Sin tipo 4.5").is_none());
    }
}
