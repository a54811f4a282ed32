use crate::policy::{HonorsPolicy, PromotionPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of a student's academic standing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub semester_number: u32,
    pub backlog_count: u32,
    pub cgpa: f64,
    pub credits_earned: u32,
    pub attendance_percentage: f64,
}

/// Year boundaries at which promotion is assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionCheckpoint {
    YearOneToTwo,
    YearTwoToThree,
    YearThreeToFour,
}

impl PromotionCheckpoint {
    pub const fn for_semester(semester_number: u32) -> Option<Self> {
        match semester_number {
            2 => Some(Self::YearOneToTwo),
            4 => Some(Self::YearTwoToThree),
            6 => Some(Self::YearThreeToFour),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::YearOneToTwo => "Year 1 to Year 2",
            Self::YearTwoToThree => "Year 2 to Year 3",
            Self::YearThreeToFour => "Year 3 to Year 4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    AtMost,
    AtLeast,
}

/// One evaluated rule, with the threshold and what was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementCheck {
    pub label: String,
    pub bound: Bound,
    pub threshold: f64,
    pub observed: f64,
    pub satisfied: bool,
}

impl RequirementCheck {
    fn at_most(label: impl Into<String>, threshold: f64, observed: f64) -> Self {
        Self {
            label: label.into(),
            bound: Bound::AtMost,
            threshold,
            observed,
            satisfied: observed <= threshold,
        }
    }

    fn at_least(label: impl Into<String>, threshold: f64, observed: f64) -> Self {
        Self {
            label: label.into(),
            bound: Bound::AtLeast,
            threshold,
            observed,
            satisfied: observed >= threshold,
        }
    }
}

impl fmt::Display for RequirementCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.satisfied { "satisfied" } else { "unsatisfied" };
        let bound = match self.bound {
            Bound::AtMost => "maximum",
            Bound::AtLeast => "minimum",
        };
        write!(
            f,
            "[{mark}] {}: {} ({bound} {})",
            self.label, self.observed, self.threshold
        )
    }
}

/// Outcome of a promotion or track eligibility check, ready to render as a checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub reason: String,
    pub requirement_details: Vec<String>,
    pub checks: Vec<RequirementCheck>,
}

impl EligibilityVerdict {
    fn from_checks(checks: Vec<RequirementCheck>, met: String, unmet: String) -> Self {
        let eligible = checks.iter().all(|check| check.satisfied);
        Self {
            eligible,
            reason: if eligible { met } else { unmet },
            requirement_details: checks.iter().map(ToString::to_string).collect(),
            checks,
        }
    }
}

pub(crate) const NO_CHECK_APPLICABLE: &str = "no check applicable";

pub(crate) fn check_promotion(
    policy: &PromotionPolicy,
    progress: &StudentProgress,
) -> EligibilityVerdict {
    let Some(checkpoint) = PromotionCheckpoint::for_semester(progress.semester_number) else {
        return EligibilityVerdict {
            eligible: true,
            reason: NO_CHECK_APPLICABLE.to_string(),
            requirement_details: Vec::new(),
            checks: Vec::new(),
        };
    };

    match checkpoint {
        PromotionCheckpoint::YearOneToTwo => {
            let max = policy.year_one_max_backlogs;
            EligibilityVerdict::from_checks(
                vec![RequirementCheck::at_most(
                    "backlogs",
                    max as f64,
                    progress.backlog_count as f64,
                )],
                policy.year_one_to_two_rule.clone(),
                format!(
                    "You have {} backlogs. {}",
                    progress.backlog_count, policy.year_one_to_two_rule
                ),
            )
        }
        PromotionCheckpoint::YearTwoToThree => {
            let required = policy.year_two_required_credits();
            EligibilityVerdict::from_checks(
                vec![RequirementCheck::at_least(
                    "credits earned from year 1",
                    required,
                    progress.credits_earned as f64,
                )],
                policy.year_two_to_three_rule.clone(),
                format!(
                    "You need {required} credits from Year 1. Currently: {}",
                    progress.credits_earned
                ),
            )
        }
        PromotionCheckpoint::YearThreeToFour => {
            let required = policy.year_three_required_credits();
            EligibilityVerdict::from_checks(
                vec![RequirementCheck::at_least(
                    "credits earned from years 1 and 2",
                    required,
                    progress.credits_earned as f64,
                )],
                policy.year_three_to_four_rule.clone(),
                format!(
                    "You need {required} credits from Year 1 & 2. Currently: {}",
                    progress.credits_earned
                ),
            )
        }
    }
}

pub(crate) fn check_honors(
    policy: &HonorsPolicy,
    progress: &StudentProgress,
) -> EligibilityVerdict {
    let checks = vec![
        RequirementCheck::at_least("CGPA", policy.min_cgpa, progress.cgpa),
        RequirementCheck::at_most(
            "backlogs",
            policy.max_backlogs as f64,
            progress.backlog_count as f64,
        ),
    ];
    let unmet = checks
        .iter()
        .filter(|check| !check.satisfied)
        .map(|check| check.label.as_str())
        .collect::<Vec<_>>()
        .join(" and ");

    EligibilityVerdict::from_checks(
        checks,
        format!(
            "eligible for the Honors / Minor track ({} to {} extra credits)",
            policy.extra_credits_min, policy.extra_credits_max
        ),
        format!("Honors / Minor track requires {unmet} within policy"),
    )
}
