use serde::{Deserialize, Serialize};

/// Student identity and summary fields recovered from the transcript header.
///
/// Every field is recovered independently; a missing one never blocks the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentHeader {
    pub name: Option<String>,
    pub student_code: Option<String>,
    pub overall_average: Option<f64>,
    pub approved_credits_from_curriculum: Option<u32>,
}

impl StudentHeader {
    /// True when no field could be recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.student_code.is_none()
            && self.overall_average.is_none()
            && self.approved_credits_from_curriculum.is_none()
    }
}

/// Whether a grade was earned in a regular term or a vacation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeKind {
    Definitive,
    Vacational,
}

impl GradeKind {
    /// Map the transcript token (`Definitiva` / `Vacacional`).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Definitiva" => Some(Self::Definitive),
            "Vacacional" => Some(Self::Vacational),
            _ => None,
        }
    }
}

/// The remedial ("habilitación") column of a course row.
///
/// The transcript prints `-` when there was no remedial exam, a number when
/// there was one, and occasionally something that is neither. The raw text is
/// kept in that last case so callers can decide what it means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemedialGrade {
    #[default]
    None,
    Decimal(f64),
    RawText(String),
}

impl RemedialGrade {
    /// Interpret a captured remedial token.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            None | Some("" | "-") => Self::None,
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Self::Decimal(value),
                _ => Self::RawText(raw.to_string()),
            },
        }
    }
}

/// One course row of a semester block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// 6 or 7 digit course code.
    pub code: String,
    pub title: String,
    pub grade_kind: GradeKind,
    pub final_grade: f64,
    #[serde(default)]
    pub remedial_grade: RemedialGrade,
}

/// A semester as printed on the transcript, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterBlock {
    /// Free-text label, e.g. "Primer período de 2020".
    pub period_label: String,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
    #[serde(default)]
    pub honor_roll_note: Option<String>,
    #[serde(default)]
    pub scholarship_note: Option<String>,
}

impl SemesterBlock {
    #[must_use]
    pub fn new(period_label: String) -> Self {
        Self {
            period_label,
            courses: Vec::new(),
            honor_roll_note: None,
            scholarship_note: None,
        }
    }
}

/// Structured result of parsing one transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub header: StudentHeader,
    #[serde(default)]
    pub semesters: Vec<SemesterBlock>,
}

impl AcademicRecord {
    /// Total number of course rows across all semesters.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}
