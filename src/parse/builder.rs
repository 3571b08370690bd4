//! Semester block accumulation.
//!
//! Classified lines drive a two-state machine: outside any semester, or
//! inside an open block. An anchor always closes the open block and opens a
//! new one; course rows and notes only land in an open block.

use crate::models::{ParseIssue, SemesterBlock};

use super::classifier::LineClass;
use super::course::{self, RawCourseRow, RowRejection};
use super::period;

/// Builder state.
#[derive(Debug, Default)]
enum BuilderState {
    #[default]
    SeekingSemester,
    InSemester(SemesterBlock),
}

/// Accumulates semester blocks from classified lines in document order.
#[derive(Debug, Default)]
pub struct SemesterBuilder {
    state: BuilderState,
    closed: Vec<SemesterBlock>,
    issues: Vec<ParseIssue>,
}

impl SemesterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classified line. `line_no` is 1-based and only used for issues.
    pub fn feed(&mut self, line_no: usize, class: LineClass<'_>) {
        let state = std::mem::take(&mut self.state);
        self.state = self.transition(state, line_no, class);
    }

    /// Close any open block and return the semesters plus collected issues.
    #[must_use]
    pub fn finish(mut self) -> (Vec<SemesterBlock>, Vec<ParseIssue>) {
        if let BuilderState::InSemester(block) = std::mem::take(&mut self.state) {
            self.close(block);
        }
        (self.closed, self.issues)
    }

    fn transition(
        &mut self,
        state: BuilderState,
        line_no: usize,
        class: LineClass<'_>,
    ) -> BuilderState {
        match (state, class) {
            (state, LineClass::Noise) => state,

            (state, LineClass::Unrecognized(text)) => {
                self.issues.push(ParseIssue::UnrecognizedLine {
                    line: line_no,
                    text: text.to_string(),
                });
                state
            }

            (state, LineClass::SemesterAnchor { ordinal, year }) => {
                if let BuilderState::InSemester(block) = state {
                    self.close(block);
                }
                let label = period::period_label(ordinal, year);
                tracing::trace!(line = line_no, %label, "semester opened");
                BuilderState::InSemester(SemesterBlock::new(label))
            }

            (BuilderState::InSemester(mut block), LineClass::CourseRow(raw)) => {
                match course::parse_row(raw) {
                    Ok(record) => block.courses.push(record),
                    Err(RowRejection::Annotation(title)) => {
                        tracing::debug!(line = line_no, %title, "annotation row excluded");
                        self.issues
                            .push(ParseIssue::ExcludedCourseRow { line: line_no, title });
                    }
                    Err(rejection) => {
                        tracing::debug!(line = line_no, reason = %rejection.describe(), "course row dropped");
                        self.issues.push(ParseIssue::IncompleteCourseRow {
                            line: line_no,
                            text: row_text(&raw),
                            reason: rejection.describe(),
                        });
                    }
                }
                BuilderState::InSemester(block)
            }

            (BuilderState::InSemester(mut block), LineClass::HonorNote(desc)) => {
                set_note(&mut block.honor_roll_note, desc);
                BuilderState::InSemester(block)
            }

            (BuilderState::InSemester(mut block), LineClass::ScholarshipNote(desc)) => {
                set_note(&mut block.scholarship_note, desc);
                BuilderState::InSemester(block)
            }

            (
                BuilderState::SeekingSemester,
                class @ (LineClass::CourseRow(_)
                | LineClass::HonorNote(_)
                | LineClass::ScholarshipNote(_)),
            ) => {
                tracing::debug!(line = line_no, "line before any semester dropped");
                self.issues.push(ParseIssue::DetachedLine {
                    line: line_no,
                    text: describe_detached(class),
                });
                BuilderState::SeekingSemester
            }
        }
    }

    fn close(&mut self, block: SemesterBlock) {
        tracing::trace!(
            label = %block.period_label,
            courses = block.courses.len(),
            "semester closed"
        );
        self.closed.push(block);
    }
}

/// First non-empty note wins.
fn set_note(slot: &mut Option<String>, desc: &str) {
    if slot.is_none() && !desc.is_empty() {
        *slot = Some(desc.to_string());
    }
}

fn row_text(raw: &RawCourseRow<'_>) -> String {
    format!("{} {} {} {}", raw.code, raw.title.trim(), raw.kind, raw.grade)
}

fn describe_detached(class: LineClass<'_>) -> String {
    match class {
        LineClass::CourseRow(raw) => row_text(&raw),
        LineClass::HonorNote(desc) => format!("Matricula honor {desc}"),
        LineClass::ScholarshipNote(desc) => format!("Beca {desc}"),
        _ => String::new(),
    }
    .trim()
    .to_string()
}
