use serde::Serialize;

/// Header field a [`ParseIssue::MalformedHeader`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderField {
    Name,
    StudentCode,
    OverallAverage,
    ApprovedCredits,
}

impl HeaderField {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::StudentCode => "student_code",
            Self::OverallAverage => "overall_average",
            Self::ApprovedCredits => "approved_credits",
        }
    }
}

/// A non-fatal problem met while parsing a transcript.
///
/// Parsing never aborts; every issue degrades to an absent field or a dropped
/// line. Line numbers are 1-based positions in the trimmed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseIssue {
    /// No text at all.
    EmptyInput,
    /// A header field was not found, or its token did not parse.
    MalformedHeader {
        field: HeaderField,
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    /// A line that matches no known shape.
    UnrecognizedLine { line: usize, text: String },
    /// Shaped like a course row but a mandatory field is unusable.
    IncompleteCourseRow {
        line: usize,
        text: String,
        reason: String,
    },
    /// Course-shaped annotation row (honor roll, work scholarship).
    ExcludedCourseRow { line: usize, title: String },
    /// Course or note line seen before any semester anchor.
    DetachedLine { line: usize, text: String },
}
