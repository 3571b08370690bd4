//! Student header recovery.
//!
//! The header lives in the first [`HEADER_WINDOW_LINES`] lines. Each field is
//! recovered by an ordered list of independent strategies; the first one that
//! yields a value wins. A located but unparseable number leaves the field
//! empty and is reported, it never aborts the other fields.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{HeaderField, ParseIssue, StudentHeader};

/// Number of leading lines searched for header fields.
pub const HEADER_WINDOW_LINES: usize = 20;

const CODE_LABEL: &str = "Código:";
const NAME_LABEL: &str = "Nombre:";
const AVERAGE_LABEL: &str = "Promedio:";

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Código:\s*(\d+)").expect("valid regex"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Nombre:\s*(.+?)(?:\s*Promedio:|$)").expect("valid regex")
});

static AVERAGE_CREDITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Promedio:\s*([\d.]+)\s*Créditos\s+aprobados\s+Pensum:\s*(\d+)")
        .expect("valid regex")
});

static AVERAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Promedio:\s*([\d.]+)").expect("valid regex"));

static CREDITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Créditos\s+aprobados\s+Pensum:\s*(\d+)").expect("valid regex")
});

/// Text the header strategies look at.
pub struct HeaderWindow<'a> {
    /// Every line of the document; line scans may peek one past the window.
    lines: &'a [&'a str],
    /// First [`HEADER_WINDOW_LINES`] lines joined with `\n`.
    text: String,
}

impl<'a> HeaderWindow<'a> {
    #[must_use]
    pub fn new(lines: &'a [&'a str]) -> Self {
        let end = lines.len().min(HEADER_WINDOW_LINES);
        Self {
            lines,
            text: lines[..end].join("\n"),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn window_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines
            .iter()
            .copied()
            .enumerate()
            .take(HEADER_WINDOW_LINES)
    }

    fn line_after(&self, idx: usize) -> Option<&'a str> {
        self.lines.get(idx + 1).map(|l| l.trim())
    }
}

/// A single way of locating a raw field token.
pub type Strategy = fn(&HeaderWindow<'_>) -> Option<String>;

/// Student code: anchored pattern, then label scan.
pub const CODE_STRATEGIES: &[Strategy] = &[code_from_pattern, code_from_lines];
/// Name: anchored multi-line pattern, then label scan.
pub const NAME_STRATEGIES: &[Strategy] = &[name_from_pattern, name_from_lines];
/// Overall average: combined average+credits pattern, then its own pattern.
pub const AVERAGE_STRATEGIES: &[Strategy] = &[average_from_combined, average_from_pattern];
/// Curriculum credits: combined average+credits pattern, then its own pattern.
pub const CREDITS_STRATEGIES: &[Strategy] = &[credits_from_combined, credits_from_pattern];

/// Run strategies in order, returning the first token found.
#[must_use]
pub fn first_match(window: &HeaderWindow<'_>, strategies: &[Strategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy(window))
}

/// Extract the header from the document's lines, collecting issues.
pub fn extract_header(lines: &[&str], issues: &mut Vec<ParseIssue>) -> StudentHeader {
    let window = HeaderWindow::new(lines);

    let student_code = first_match(&window, CODE_STRATEGIES);
    if student_code.is_none() {
        issues.push(missing(HeaderField::StudentCode));
    }

    let name = first_match(&window, NAME_STRATEGIES);
    if name.is_none() {
        issues.push(missing(HeaderField::Name));
    }

    let overall_average = parse_field(
        first_match(&window, AVERAGE_STRATEGIES),
        HeaderField::OverallAverage,
        issues,
        |token| token.parse::<f64>().ok().filter(|v| v.is_finite()),
    );

    let approved_credits_from_curriculum = parse_field(
        first_match(&window, CREDITS_STRATEGIES),
        HeaderField::ApprovedCredits,
        issues,
        |token| token.parse::<u32>().ok(),
    );

    StudentHeader {
        name,
        student_code,
        overall_average,
        approved_credits_from_curriculum,
    }
}

fn parse_field<T>(
    token: Option<String>,
    field: HeaderField,
    issues: &mut Vec<ParseIssue>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let Some(token) = token else {
        issues.push(missing(field));
        return None;
    };
    let value = parse(&token);
    if value.is_none() {
        tracing::warn!(field = field.as_str(), %token, "unparseable header value");
        issues.push(ParseIssue::MalformedHeader {
            field,
            token: Some(token),
        });
    }
    value
}

fn missing(field: HeaderField) -> ParseIssue {
    tracing::debug!(field = field.as_str(), "header field not found");
    ParseIssue::MalformedHeader { field, token: None }
}

fn capture(re: &Regex, text: &str, group: usize) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Cut a trailing `Promedio:` fragment printed on the same line.
fn strip_average(s: &str) -> &str {
    s.split(AVERAGE_LABEL).next().unwrap_or(s).trim()
}

// ─── Student code ───

fn code_from_pattern(window: &HeaderWindow<'_>) -> Option<String> {
    capture(&CODE_RE, window.text(), 1)
}

fn code_from_lines(window: &HeaderWindow<'_>) -> Option<String> {
    for (idx, line) in window.window_lines() {
        let Some((_, rest)) = line.split_once(CODE_LABEL) else {
            continue;
        };
        let rest = rest.trim();
        if is_numeric(rest) {
            return Some(rest.to_string());
        }
        if let Some(next) = window.line_after(idx) {
            if is_numeric(next) {
                return Some(next.to_string());
            }
        }
    }
    None
}

// ─── Name ───

fn name_from_pattern(window: &HeaderWindow<'_>) -> Option<String> {
    capture(&NAME_RE, window.text(), 1)
}

fn name_from_lines(window: &HeaderWindow<'_>) -> Option<String> {
    for (idx, line) in window.window_lines() {
        let Some((_, rest)) = line.split_once(NAME_LABEL) else {
            continue;
        };
        let rest = rest.trim();
        let candidate = if !rest.is_empty() && !is_numeric(rest) {
            Some(rest)
        } else {
            window
                .line_after(idx)
                .filter(|next| !next.is_empty() && !is_numeric(next))
        };
        if let Some(name) = candidate.map(strip_average).filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }
    }
    None
}

// ─── Average and credits ───

fn average_from_combined(window: &HeaderWindow<'_>) -> Option<String> {
    capture(&AVERAGE_CREDITS_RE, window.text(), 1)
}

fn average_from_pattern(window: &HeaderWindow<'_>) -> Option<String> {
    capture(&AVERAGE_RE, window.text(), 1)
}

fn credits_from_combined(window: &HeaderWindow<'_>) -> Option<String> {
    capture(&AVERAGE_CREDITS_RE, window.text(), 2)
}

fn credits_from_pattern(window: &HeaderWindow<'_>) -> Option<String> {
    capture(&CREDITS_RE, window.text(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(text: &str) -> (StudentHeader, Vec<ParseIssue>) {
        let lines: Vec<&str> = text.lines().collect();
        let mut issues = Vec::new();
        let header = extract_header(&lines, &mut issues);
        (header, issues)
    }

    #[test]
    fn full_header() {
        let (h, issues) = header_of(
            "Código: 1090123\nNombre: Ana Torres\nPromedio: 4.20 Créditos aprobados Pensum: 96",
        );
        assert_eq!(h.student_code.as_deref(), Some("1090123"));
        assert_eq!(h.name.as_deref(), Some("Ana Torres"));
        assert_eq!(h.overall_average, Some(4.20));
        assert_eq!(h.approved_credits_from_curriculum, Some(96));
        assert!(issues.is_empty());
    }

    #[test]
    fn name_and_average_on_same_line() {
        let (h, _) = header_of("Nombre: Luis Pérez Promedio: 3.9\nCódigo: 1151234");
        assert_eq!(h.name.as_deref(), Some("Luis Pérez"));
        assert_eq!(h.overall_average, Some(3.9));
        assert_eq!(h.approved_credits_from_curriculum, None);
    }

    #[test]
    fn code_on_following_line() {
        let (h, _) = header_of("Código:\n1151999\nNombre: X");
        assert_eq!(h.student_code.as_deref(), Some("1151999"));
    }

    #[test]
    fn code_line_scan_fallback() {
        let window_lines = ["Código: ABC", "1150001"];
        let window = HeaderWindow::new(&window_lines);
        assert_eq!(code_from_pattern(&window), None);
        assert_eq!(code_from_lines(&window).as_deref(), Some("1150001"));
        assert_eq!(
            first_match(&window, CODE_STRATEGIES).as_deref(),
            Some("1150001")
        );
    }

    #[test]
    fn name_line_scan_fallback() {
        let lines = ["Nombre: María Gómez Promedio: 4.1"];
        let window = HeaderWindow::new(&lines);
        assert_eq!(name_from_lines(&window).as_deref(), Some("María Gómez"));

        let lines = ["Nombre:", "Carlos Ruiz"];
        let window = HeaderWindow::new(&lines);
        assert_eq!(name_from_lines(&window).as_deref(), Some("Carlos Ruiz"));

        let lines = ["Nombre:", "12345"];
        let window = HeaderWindow::new(&lines);
        assert_eq!(name_from_lines(&window), None);
    }

    #[test]
    fn credits_without_average() {
        let (h, issues) = header_of("Créditos aprobados Pensum: 120");
        assert_eq!(h.approved_credits_from_curriculum, Some(120));
        assert_eq!(h.overall_average, None);
        assert!(issues.contains(&ParseIssue::MalformedHeader {
            field: HeaderField::OverallAverage,
            token: None,
        }));
    }

    #[test]
    fn unparseable_average_is_reported_not_fatal() {
        let (h, issues) =
            header_of("Código: 1\nPromedio: 4.2.1 Créditos aprobados Pensum: 96");
        assert_eq!(h.overall_average, None);
        assert_eq!(h.approved_credits_from_curriculum, Some(96));
        assert_eq!(h.student_code.as_deref(), Some("1"));
        assert!(issues.contains(&ParseIssue::MalformedHeader {
            field: HeaderField::OverallAverage,
            token: Some("4.2.1".into()),
        }));
    }

    #[test]
    fn oversized_credits_left_empty() {
        let (h, _) = header_of("Créditos aprobados Pensum: 99999999999999");
        assert_eq!(h.approved_credits_from_curriculum, None);
    }

    #[test]
    fn fields_outside_window_ignored() {
        let mut text = "linea\n".repeat(HEADER_WINDOW_LINES);
        text.push_str("Código: 1090123");
        let (h, _) = header_of(&text);
        assert_eq!(h.student_code, None);
    }

    #[test]
    fn empty_input_all_none() {
        let (h, issues) = header_of("");
        assert!(h.is_empty());
        assert_eq!(issues.len(), 4);
    }
}
