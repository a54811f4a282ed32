use super::grading::resolve_grade;
use super::marks::{course_percentage, Course, EndSemester};
use crate::policy::PolicyTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completed semester as an input to CGPA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    pub sgpa: f64,
    pub credits: u32,
}

impl SemesterRecord {
    pub fn new(sgpa: f64, credits: u32) -> Self {
        Self { sgpa, credits }
    }
}

/// SGPA together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub sgpa: f64,
    pub published_credits: u32,
    pub pending_courses: usize,
}

/// Σ(value·credits) / Σ(credits), or 0 when nothing carries credit.
fn weighted_mean<I>(entries: I) -> f64
where
    I: IntoIterator<Item = (f64, u32)>,
{
    let (weighted, credits) = entries
        .into_iter()
        .fold((0.0_f64, 0_u64), |(weighted, credits), (value, weight)| {
            (weighted + value * weight as f64, credits + weight as u64)
        });

    if credits == 0 {
        0.0
    } else {
        weighted / credits as f64
    }
}

pub(crate) fn summarize_semester(policy: &PolicyTable, courses: &[Course]) -> SemesterSummary {
    let mut published_credits = 0;
    let mut pending_courses = 0;
    let mut graded = Vec::with_capacity(courses.len());

    for course in courses {
        match course.end_sem_exam {
            EndSemester::Pending => pending_courses += 1,
            EndSemester::Published(_) => {
                published_credits += course.credits;
                let percentage = course_percentage(policy, course);
                let points = resolve_grade(&policy.grading_scale, percentage).points;
                graded.push((points as f64, course.credits));
            }
        }
    }
    let sgpa = weighted_mean(graded);

    debug!(sgpa, published_credits, pending_courses, "semester aggregated");

    SemesterSummary {
        sgpa,
        published_credits,
        pending_courses,
    }
}

pub(crate) fn compute_sgpa(policy: &PolicyTable, courses: &[Course]) -> f64 {
    summarize_semester(policy, courses).sgpa
}

pub fn compute_cgpa(semesters: &[SemesterRecord]) -> f64 {
    weighted_mean(semesters.iter().map(|record| (record.sgpa, record.credits)))
}

/// Blend one more semester into an existing CGPA, treating the CGPA as a credit-weighted
/// mean over `current_credits`.
pub fn predict_cgpa(
    current_cgpa: f64,
    current_credits: u32,
    predicted_sgpa: f64,
    semester_credits: u32,
) -> f64 {
    let total_credits = current_credits as u64 + semester_credits as u64;
    if total_credits == 0 {
        return current_cgpa;
    }

    (current_cgpa * current_credits as f64 + predicted_sgpa * semester_credits as f64)
        / total_credits as f64
}
