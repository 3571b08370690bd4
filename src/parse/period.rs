//! Period labels and semester keys.
//!
//! Transcripts name terms as free text ("Primer período de 2020"). Storage
//! keys them as `2020-1`, `2020-2` and, for vacation sessions, `2020-V`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::GradeKind;

/// Key used for vacational courses whose label carries no year.
pub const UNKNOWN_VACATIONAL_KEY: &str = "FormatoDesconocido-V";

static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\w+)\s+período\s+de\s+(\d{4})").expect("valid regex")
});

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4})").expect("valid regex"));

/// Normalize a regular-term label.
///
/// Only first and second terms have a numeric form; any other label is
/// returned unchanged.
#[must_use]
pub fn normalize_period(label: &str) -> String {
    if let Some(caps) = PERIOD_RE.captures(label) {
        let ordinal = caps[1].to_lowercase();
        let year = &caps[2];
        if ordinal.contains("primer") {
            return format!("{year}-1");
        }
        if ordinal.contains("segundo") {
            return format!("{year}-2");
        }
    }
    label.to_string()
}

/// Key for a course taken in a vacation session: first 4-digit year of the
/// label, suffixed with `-V`.
#[must_use]
pub fn vacational_key(label: &str) -> String {
    match YEAR_RE.captures(label) {
        Some(caps) => format!("{}-V", &caps[1]),
        None => UNKNOWN_VACATIONAL_KEY.to_string(),
    }
}

/// Semester key under which a course of the given kind is stored.
#[must_use]
pub fn semester_key(label: &str, kind: GradeKind) -> String {
    match kind {
        GradeKind::Definitive => normalize_period(label),
        GradeKind::Vacational => vacational_key(label),
    }
}

/// Canonical label for a semester anchor: `"<Ordinal> período de <year>"`
/// with the ordinal capitalized.
#[must_use]
pub fn period_label(ordinal: &str, year: &str) -> String {
    format!("{} período de {year}", capitalize(ordinal))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_second_terms() {
        assert_eq!(normalize_period("Primer período de 2021"), "2021-1");
        assert_eq!(normalize_period("Segundo período de 2019"), "2019-2");
    }

    #[test]
    fn other_ordinals_unchanged() {
        assert_eq!(
            normalize_period("Tercer período de 2020"),
            "Tercer período de 2020"
        );
        assert_eq!(
            normalize_period("Duodecimo período de 2030"),
            "Duodecimo período de 2030"
        );
    }

    #[test]
    fn unmatched_label_unchanged() {
        assert_eq!(normalize_period("Intersemestral"), "Intersemestral");
        assert_eq!(normalize_period(""), "");
    }

    #[test]
    fn vacational_uses_year_regardless_of_ordinal() {
        assert_eq!(vacational_key("Primer período de 2020"), "2020-V");
        assert_eq!(vacational_key("Segundo período de 2018"), "2018-V");
        assert_eq!(vacational_key("Tercer período de 2022"), "2022-V");
    }

    #[test]
    fn vacational_without_year_uses_sentinel() {
        assert_eq!(vacational_key("Periodo vacacional"), UNKNOWN_VACATIONAL_KEY);
        assert_eq!(vacational_key(""), "FormatoDesconocido-V");
    }

    #[test]
    fn semester_key_dispatches_on_kind() {
        let label = "Segundo período de 2021";
        assert_eq!(semester_key(label, GradeKind::Definitive), "2021-2");
        assert_eq!(semester_key(label, GradeKind::Vacational), "2021-V");
    }

    #[test]
    fn anchor_label_is_capitalized() {
        assert_eq!(period_label("PRIMER", "2020"), "Primer período de 2020");
        assert_eq!(period_label("segundo", "2019"), "Segundo período de 2019");
        assert_eq!(period_label("undecimo", "2024"), "Undecimo período de 2024");
    }
}
