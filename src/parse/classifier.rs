use std::sync::LazyLock;

use regex::Regex;

use super::course::{self, RawCourseRow};

static SEMESTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(Primer|Segundo|Tercer|Cuarto|Quinto|Sexto|Septimo|Octavo|Noveno|Decimo|Undecimo|Duodecimo)\s+per[ií]odo\s+de\s+(\d{4})$",
    )
    .expect("valid regex")
});

static HONOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Matricula\s+honor\b\s*(.*)$").expect("valid regex"));

static SCHOLARSHIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Beca\b\s*(.*)$").expect("valid regex"));

/// Line prefixes printed by the registrar on every page.
const NOISE_PREFIXES: &[&str] = &["UF", "PS", "Generado:", "pag "];

/// Institutional boilerplate that can appear anywhere on a line.
const NOISE_FRAGMENTS: &[&str] = &[
    "Universidad Francisco de Paula Santander",
    "División de Sistemas",
    "Reporte de Notas Semestrales",
];

/// Column header row of the course table (compared lower-cased).
const TABLE_HEADER: &str = "código materia tipo nota definitiva habilitación";

/// Category of one trimmed transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Noise,
    SemesterAnchor { ordinal: &'a str, year: &'a str },
    CourseRow(RawCourseRow<'a>),
    /// Honor roll annotation; carries the trimmed description.
    HonorNote(&'a str),
    /// Scholarship annotation; carries the trimmed description.
    ScholarshipNote(&'a str),
    Unrecognized(&'a str),
}

/// Classify a single line. Rules are tried in priority order.
#[must_use]
pub fn classify(line: &str) -> LineClass<'_> {
    let line = line.trim();
    if line.is_empty() || is_noise(line) {
        return LineClass::Noise;
    }

    if let Some(caps) = SEMESTER_RE.captures(line) {
        if let (Some(ordinal), Some(year)) = (caps.get(1), caps.get(2)) {
            return LineClass::SemesterAnchor {
                ordinal: ordinal.as_str(),
                year: year.as_str(),
            };
        }
    }

    if let Some(row) = course::match_row(line) {
        return LineClass::CourseRow(row);
    }

    if let Some(desc) = capture_description(&HONOR_RE, line) {
        return LineClass::HonorNote(desc);
    }

    if let Some(desc) = capture_description(&SCHOLARSHIP_RE, line) {
        return LineClass::ScholarshipNote(desc);
    }

    LineClass::Unrecognized(line)
}

fn is_noise(line: &str) -> bool {
    NOISE_PREFIXES.iter().any(|p| line.starts_with(p))
        || NOISE_FRAGMENTS.iter().any(|f| line.contains(f))
        || line.to_lowercase().starts_with(TABLE_HEADER)
}

fn capture_description<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str().trim()))
}
