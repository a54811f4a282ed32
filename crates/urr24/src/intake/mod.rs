//! Intake of untrusted course records.
//!
//! Records arrive from document extraction or spreadsheets with any field possibly missing
//! or estimated. The guard turns them into [`Course`] values whose components respect the
//! policy's mark ceilings, so the engine itself never has to clamp.

mod ledger;
mod normalizer;

pub use ledger::{CourseLedgerImporter, LedgerError};

use crate::policy::MarksPolicy;
use crate::rules::{CieComponents, Course, EndSemester};
use normalizer::normalize_course_name;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Best-effort course record as supplied by an external collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSubmission {
    pub name: String,
    #[serde(default)]
    pub minor_one: Option<f64>,
    #[serde(default)]
    pub minor_two: Option<f64>,
    #[serde(default)]
    pub mid_sem_exam: Option<f64>,
    #[serde(default)]
    pub group_activity: Option<f64>,
    #[serde(default)]
    pub end_sem_exam: Option<f64>,
    #[serde(default)]
    pub credits: Option<u32>,
}

/// Lets already-typed courses (e.g. from a snapshot file) pass back through the guard.
impl From<Course> for CourseSubmission {
    fn from(course: Course) -> Self {
        Self {
            name: course.name,
            minor_one: Some(course.cie.minor_one),
            minor_two: Some(course.cie.minor_two),
            mid_sem_exam: Some(course.cie.mid_sem_exam),
            group_activity: Some(course.cie.group_activity),
            end_sem_exam: course.end_sem_exam.score(),
            credits: Some(course.credits),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarksViolation {
    #[error("course name is missing")]
    MissingName,
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be between 0 and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        max: f64,
        found: f64,
    },
    #[error("credits must be positive")]
    ZeroCredits,
}

/// Guard responsible for producing validated `Course` instances.
#[derive(Debug, Clone, Default)]
pub struct CourseIntake {
    marks: MarksPolicy,
}

impl CourseIntake {
    pub fn with_policy(marks: MarksPolicy) -> Self {
        Self { marks }
    }

    /// Convert an inbound submission into a course ready for aggregation.
    pub fn course_from_submission(
        &self,
        submission: CourseSubmission,
    ) -> Result<Course, MarksViolation> {
        let name = normalize_course_name(&submission.name);
        if name.is_empty() {
            return Err(MarksViolation::MissingName);
        }

        let minor_one =
            self.component(&name, "minor_one", submission.minor_one, self.marks.minor_max)?;
        let minor_two =
            self.component(&name, "minor_two", submission.minor_two, self.marks.minor_max)?;
        let mid_sem_exam = self.component(
            &name,
            "mid_sem_exam",
            submission.mid_sem_exam,
            self.marks.mid_sem_max,
        )?;
        let group_activity = self.component(
            &name,
            "group_activity",
            submission.group_activity,
            self.marks.group_activity_max,
        )?;

        // Bounded components keep CIE within `cie_max`.
        let cie = CieComponents::new(minor_one, minor_two, mid_sem_exam, group_activity);

        let end_sem_exam = match submission.end_sem_exam {
            Some(score) => {
                EndSemester::Published(bounded("end_sem_exam", score, self.marks.end_sem_max)?)
            }
            None => EndSemester::Pending,
        };

        let credits = submission.credits.unwrap_or(self.marks.default_credits);
        if credits == 0 {
            return Err(MarksViolation::ZeroCredits);
        }

        Ok(Course {
            name,
            cie,
            end_sem_exam,
            credits,
        })
    }

    fn component(
        &self,
        course: &str,
        field: &'static str,
        value: Option<f64>,
        max: f64,
    ) -> Result<f64, MarksViolation> {
        match value {
            Some(score) => bounded(field, score, max),
            None => {
                warn!(course, field, "component missing from submission; counting as 0");
                Ok(0.0)
            }
        }
    }
}

fn bounded(field: &'static str, value: f64, max: f64) -> Result<f64, MarksViolation> {
    if !value.is_finite() {
        return Err(MarksViolation::NotFinite { field });
    }
    if !(0.0..=max).contains(&value) {
        return Err(MarksViolation::OutOfRange {
            field,
            max,
            found: value,
        });
    }
    Ok(value)
}
