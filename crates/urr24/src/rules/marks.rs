use super::grading::{resolve_grade, GradeResult};
use crate::policy::{Grade, PolicyTable};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CREDITS: u32 = 3;

fn default_credits() -> u32 {
    DEFAULT_CREDITS
}

/// Continuous internal evaluation (CIE) components of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CieComponents {
    pub minor_one: f64,
    pub minor_two: f64,
    pub mid_sem_exam: f64,
    pub group_activity: f64,
}

impl CieComponents {
    pub fn new(minor_one: f64, minor_two: f64, mid_sem_exam: f64, group_activity: f64) -> Self {
        Self {
            minor_one,
            minor_two,
            mid_sem_exam,
            group_activity,
        }
    }

    pub fn total(&self) -> f64 {
        self.minor_one + self.minor_two + self.mid_sem_exam + self.group_activity
    }
}

/// End-semester exam (ESE) outcome. Only published results count towards SGPA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum EndSemester {
    #[default]
    Pending,
    Published(f64),
}

impl EndSemester {
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Pending => None,
            Self::Published(score) => Some(*score),
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

impl From<Option<f64>> for EndSemester {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Pending, Self::Published)
    }
}

impl From<EndSemester> for Option<f64> {
    fn from(value: EndSemester) -> Self {
        value.score()
    }
}

/// A registered course with its assessment scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(flatten)]
    pub cie: CieComponents,
    #[serde(default)]
    pub end_sem_exam: EndSemester,
    #[serde(default = "default_credits")]
    pub credits: u32,
}

impl Course {
    pub fn new(name: impl Into<String>, cie: CieComponents) -> Self {
        Self {
            name: name.into(),
            cie,
            end_sem_exam: EndSemester::Pending,
            credits: DEFAULT_CREDITS,
        }
    }

    pub fn with_end_sem(mut self, score: f64) -> Self {
        self.end_sem_exam = EndSemester::Published(score);
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }
}

pub fn aggregate_cie(course: &Course) -> f64 {
    course.cie.total()
}

/// CIE plus the ESE score; a pending ESE contributes nothing.
pub fn final_total(course: &Course) -> f64 {
    aggregate_cie(course) + course.end_sem_exam.score().unwrap_or(0.0)
}

/// Percentage of `total_marks` out of `denominator`. A zero denominator yields 0.
pub fn to_percentage(total_marks: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    total_marks / denominator * 100.0
}

/// ESE score needed to reach a target percentage, given the CIE already banked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EseRequirement {
    /// Already secured by CIE alone.
    Guaranteed,
    Required { score: f64 },
    /// Needs more than the ESE ceiling.
    Unreachable { required: f64 },
}

impl EseRequirement {
    pub fn summary(&self) -> String {
        match self {
            Self::Guaranteed => "secured".to_string(),
            Self::Required { score } => format!("needs {score:.1} in ESE"),
            Self::Unreachable { required } => format!("unreachable (needs {required:.1})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EseTarget {
    pub grade: Grade,
    pub min_percentage: f64,
    pub requirement: EseRequirement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradePrediction {
    pub grade: Grade,
    pub percentage: f64,
    pub points: u8,
}

pub(crate) fn required_ese(
    policy: &PolicyTable,
    cie: f64,
    target_percentage: f64,
) -> EseRequirement {
    let required = target_percentage / 100.0 * policy.marks.total_max() - cie;
    if required <= 0.0 {
        EseRequirement::Guaranteed
    } else if required > policy.marks.end_sem_max {
        EseRequirement::Unreachable { required }
    } else {
        EseRequirement::Required { score: required }
    }
}

/// ESE requirements for every passing band, best grade first.
pub(crate) fn ese_targets(policy: &PolicyTable, cie: f64) -> Vec<EseTarget> {
    policy
        .grading_scale
        .iter()
        .filter(|band| band.grade.is_pass())
        .map(|band| EseTarget {
            grade: band.grade,
            min_percentage: band.min_percentage,
            requirement: required_ese(policy, cie, band.min_percentage),
        })
        .collect()
}

pub(crate) fn predict_final_grade(
    policy: &PolicyTable,
    cie: f64,
    expected_ese: f64,
) -> GradePrediction {
    let percentage = to_percentage(cie + expected_ese, policy.marks.total_max());
    let GradeResult { grade, points } = resolve_grade(&policy.grading_scale, percentage);
    GradePrediction {
        grade,
        percentage,
        points,
    }
}

/// Percentage of a course's final total against the policy's full marks.
pub(crate) fn course_percentage(policy: &PolicyTable, course: &Course) -> f64 {
    to_percentage(final_total(course), policy.marks.total_max())
}
