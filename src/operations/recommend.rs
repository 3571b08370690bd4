//! Elective recommendation.
//!
//! A candidate is an elective outside the sociohumanistic area that the
//! student never took, whose direct prerequisites are all approved and whose
//! credit minimum (if any) is met by the credits of the approved catalog courses.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, TranscriptError};
use crate::models::catalog::SOCIOHUMANISTIC;
use crate::models::{CatalogCourse, TookRecord};

/// One recommended elective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    /// Mean grade obtained in the elective's prerequisites, `0.0` if it has none.
    pub score: f64,
}

/// Recommend electives for a stored student, best score first.
pub fn recommend_electives(
    db: &Database,
    student_id: &str,
    passing_grade: f64,
) -> Result<Vec<Recommendation>> {
    if db.get_student(student_id)?.is_none() {
        return Err(TranscriptError::StudentNotFound {
            student_id: student_id.to_string(),
        });
    }

    let took = db.get_took_for_student(student_id)?;
    let catalog = db.get_all_courses()?;
    let recommendations = rank_electives(&catalog, &took, passing_grade);

    tracing::info!(
        student_id,
        candidates = recommendations.len(),
        "electives ranked"
    );
    Ok(recommendations)
}

/// Pure ranking over a catalog and one student's took relationships.
#[must_use]
pub fn rank_electives(
    catalog: &[CatalogCourse],
    took: &[TookRecord],
    passing_grade: f64,
) -> Vec<Recommendation> {
    let credits_by_id: HashMap<&str, u32> = catalog
        .iter()
        .map(|c| (c.id.as_str(), c.credits.unwrap_or(0)))
        .collect();

    // Only catalog courses count as approved.
    let approved: BTreeSet<&str> = took
        .iter()
        .filter(|t| t.grade >= passing_grade)
        .map(|t| t.course_id.as_str())
        .filter(|id| credits_by_id.contains_key(id))
        .collect();
    if approved.is_empty() {
        return Vec::new();
    }

    let taken: BTreeSet<&str> = took.iter().map(|t| t.course_id.as_str()).collect();

    let approved_credits: u64 = approved
        .iter()
        .filter_map(|id| credits_by_id.get(id))
        .map(|&credits| u64::from(credits))
        .sum();

    let mut recommendations: Vec<Recommendation> = catalog
        .iter()
        .filter(|c| c.elective)
        .filter(|c| c.effective_elective_type() != SOCIOHUMANISTIC)
        .filter(|c| !taken.contains(c.id.as_str()))
        .filter(|c| c.requires.iter().all(|r| approved.contains(r.as_str())))
        .filter(|c| {
            c.min_credits_required
                .map_or(true, |min| approved_credits >= u64::from(min))
        })
        .map(|c| Recommendation {
            id: c.id.clone(),
            name: c.name.clone(),
            score: prerequisite_score(&c.requires, took),
        })
        .collect();

    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    recommendations
}

fn prerequisite_score(requires: &[String], took: &[TookRecord]) -> f64 {
    let grades: Vec<f64> = took
        .iter()
        .filter(|t| requires.iter().any(|r| *r == t.course_id))
        .map(|t| t.grade)
        .collect();
    if grades.is_empty() {
        0.0
    } else {
        grades.iter().sum::<f64>() / grades.len() as f64
    }
}
