//! Declarative URR24 policy table.
//!
//! Every threshold the rules engine consults lives here. The table is built once (from the
//! built-in defaults or a JSON override), validated, and then handed to the engine by value.

mod grade;

pub use grade::{Grade, GradeBand};

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Credits registered across year 1 (two semesters of 16).
pub const YEAR_ONE_CREDITS: u32 = 32;
/// Credits registered across years 1 and 2.
pub const YEAR_ONE_AND_TWO_CREDITS: u32 = 64;
/// Earlier drafts assumed 20 credits per semester.
pub const LEGACY_YEAR_ONE_CREDITS: u32 = 40;
pub const LEGACY_YEAR_ONE_AND_TWO_CREDITS: u32 = 80;

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("grading scale must contain at least one band")]
    EmptyGradingScale,
    #[error("grading scale must be sorted by descending floor ({previous} then {next})")]
    UnsortedGradingScale { previous: f64, next: f64 },
    #[error("lowest grade band must start at 0, found {found}")]
    MissingZeroFloor { found: f64 },
    #[error("grade {grade} awards {points} points; the maximum is 10")]
    PointsOutOfRange { grade: Grade, points: u8 },
    #[error("grade points must not increase down the scale ({grade} awards {points})")]
    UnorderedPoints { grade: Grade, points: u8 },
    #[error("{field} must be a finite, positive value (found {found})")]
    InvalidThreshold { field: &'static str, found: f64 },
    #[error("condonation floor {condonation_min} exceeds minimum attendance {min_required}")]
    InvertedAttendanceBands {
        condonation_min: f64,
        min_required: f64,
    },
    #[error("{field} must be greater than zero")]
    ZeroCount { field: &'static str },
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid policy document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Attendance thresholds, in percent, plus the calendar the projections assume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendancePolicy {
    pub min_required: f64,
    pub condonation_min: f64,
    pub detention_threshold: f64,
    pub total_working_days: u32,
    pub classes_per_week: u32,
    pub days_per_week: u32,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            min_required: 75.0,
            condonation_min: 65.0,
            detention_threshold: 65.0,
            total_working_days: 90,
            classes_per_week: 5,
            days_per_week: 7,
        }
    }
}

/// Maximum marks per assessment component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarksPolicy {
    pub minor_max: f64,
    pub mid_sem_max: f64,
    pub group_activity_max: f64,
    pub end_sem_max: f64,
    pub default_credits: u32,
}

impl MarksPolicy {
    /// Two minors, the MSE and the group activity score.
    pub fn cie_max(&self) -> f64 {
        self.minor_max * 2.0 + self.mid_sem_max + self.group_activity_max
    }

    pub fn total_max(&self) -> f64 {
        self.cie_max() + self.end_sem_max
    }
}

impl Default for MarksPolicy {
    fn default() -> Self {
        Self {
            minor_max: 25.0,
            mid_sem_max: 50.0,
            group_activity_max: 50.0,
            end_sem_max: 100.0,
            default_credits: 3,
        }
    }
}

/// Year-to-year promotion rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionPolicy {
    pub total_degree_credits: u32,
    pub year_one_max_backlogs: u32,
    pub year_one_credits: u32,
    pub year_two_credit_fraction: f64,
    pub year_one_and_two_credits: u32,
    pub year_three_credit_fraction: f64,
    pub year_one_to_two_rule: String,
    pub year_two_to_three_rule: String,
    pub year_three_to_four_rule: String,
}

impl PromotionPolicy {
    pub fn year_two_required_credits(&self) -> f64 {
        self.year_one_credits as f64 * self.year_two_credit_fraction
    }

    pub fn year_three_required_credits(&self) -> f64 {
        self.year_one_and_two_credits as f64 * self.year_three_credit_fraction
    }
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            total_degree_credits: 160,
            year_one_max_backlogs: 5,
            year_one_credits: YEAR_ONE_CREDITS,
            year_two_credit_fraction: 0.5,
            year_one_and_two_credits: YEAR_ONE_AND_TWO_CREDITS,
            year_three_credit_fraction: 0.6,
            year_one_to_two_rule: "Must clear all courses OR max 5 backlogs".to_string(),
            year_two_to_three_rule: "Must secure 50% credits of Year 1".to_string(),
            year_three_to_four_rule: "Must secure 60% credits of Year 1 & 2 combined"
                .to_string(),
        }
    }
}

/// Entry requirements for the Honors / Minor track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HonorsPolicy {
    pub min_cgpa: f64,
    pub max_backlogs: u32,
    pub extra_credits_min: u32,
    pub extra_credits_max: u32,
}

impl Default for HonorsPolicy {
    fn default() -> Self {
        Self {
            min_cgpa: 7.0,
            max_backlogs: 0,
            extra_credits_min: 18,
            extra_credits_max: 20,
        }
    }
}

/// The complete, immutable rule set consulted by [`crate::rules::RulesEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTable {
    pub attendance: AttendancePolicy,
    pub grading_scale: Vec<GradeBand>,
    pub marks: MarksPolicy,
    pub promotion: PromotionPolicy,
    pub honors: HonorsPolicy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::urr24()
    }
}

impl PolicyTable {
    /// Undergraduate Rules & Regulations 2024 as published.
    pub fn urr24() -> Self {
        Self {
            attendance: AttendancePolicy::default(),
            grading_scale: grade::urr24_scale(),
            marks: MarksPolicy::default(),
            promotion: PromotionPolicy::default(),
            honors: HonorsPolicy::default(),
        }
    }

    /// Parse a (possibly partial) JSON policy document. Missing sections keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, PolicyError> {
        let table: PolicyTable = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&raw)?;
        info!(path = %path.display(), bands = table.grading_scale.len(), "loaded policy table");
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        self.validate_grading_scale()?;
        self.validate_attendance()?;
        self.validate_marks()?;
        self.validate_promotion()
    }

    fn validate_grading_scale(&self) -> Result<(), PolicyError> {
        let scale = &self.grading_scale;
        let last = scale.last().ok_or(PolicyError::EmptyGradingScale)?;

        for band in scale {
            if !band.min_percentage.is_finite() {
                return Err(PolicyError::InvalidThreshold {
                    field: "grading_scale.min_percentage",
                    found: band.min_percentage,
                });
            }
            if band.points > 10 {
                return Err(PolicyError::PointsOutOfRange {
                    grade: band.grade,
                    points: band.points,
                });
            }
        }

        for pair in scale.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if lower.min_percentage >= upper.min_percentage {
                return Err(PolicyError::UnsortedGradingScale {
                    previous: upper.min_percentage,
                    next: lower.min_percentage,
                });
            }
            if lower.points > upper.points {
                return Err(PolicyError::UnorderedPoints {
                    grade: lower.grade,
                    points: lower.points,
                });
            }
        }

        if last.min_percentage != 0.0 {
            return Err(PolicyError::MissingZeroFloor {
                found: last.min_percentage,
            });
        }

        Ok(())
    }

    fn validate_attendance(&self) -> Result<(), PolicyError> {
        let attendance = &self.attendance;
        positive("attendance.min_required", attendance.min_required)?;
        positive("attendance.condonation_min", attendance.condonation_min)?;
        positive("attendance.detention_threshold", attendance.detention_threshold)?;

        if attendance.min_required > 100.0 {
            return Err(PolicyError::InvalidThreshold {
                field: "attendance.min_required",
                found: attendance.min_required,
            });
        }
        if attendance.condonation_min > attendance.min_required {
            return Err(PolicyError::InvertedAttendanceBands {
                condonation_min: attendance.condonation_min,
                min_required: attendance.min_required,
            });
        }
        if attendance.total_working_days == 0 {
            return Err(PolicyError::ZeroCount {
                field: "attendance.total_working_days",
            });
        }
        if attendance.classes_per_week == 0 {
            return Err(PolicyError::ZeroCount {
                field: "attendance.classes_per_week",
            });
        }
        if attendance.days_per_week == 0 {
            return Err(PolicyError::ZeroCount {
                field: "attendance.days_per_week",
            });
        }
        Ok(())
    }

    fn validate_marks(&self) -> Result<(), PolicyError> {
        let marks = &self.marks;
        positive("marks.minor_max", marks.minor_max)?;
        positive("marks.mid_sem_max", marks.mid_sem_max)?;
        positive("marks.group_activity_max", marks.group_activity_max)?;
        positive("marks.end_sem_max", marks.end_sem_max)?;
        if marks.default_credits == 0 {
            return Err(PolicyError::ZeroCount {
                field: "marks.default_credits",
            });
        }
        Ok(())
    }

    fn validate_promotion(&self) -> Result<(), PolicyError> {
        let promotion = &self.promotion;
        fraction(
            "promotion.year_two_credit_fraction",
            promotion.year_two_credit_fraction,
        )?;
        fraction(
            "promotion.year_three_credit_fraction",
            promotion.year_three_credit_fraction,
        )?;
        if promotion.year_one_credits == 0 {
            return Err(PolicyError::ZeroCount {
                field: "promotion.year_one_credits",
            });
        }
        if promotion.year_one_and_two_credits == 0 {
            return Err(PolicyError::ZeroCount {
                field: "promotion.year_one_and_two_credits",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PolicyError::InvalidThreshold {
            field,
            found: value,
        })
    }
}

fn fraction(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(PolicyError::InvalidThreshold {
            field,
            found: value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urr24_defaults_are_valid() {
        let policy = PolicyTable::urr24();
        policy.validate().expect("built-in policy validates");
        assert_eq!(policy.marks.cie_max(), 150.0);
        assert_eq!(policy.marks.total_max(), 250.0);
        assert_eq!(policy.promotion.total_degree_credits, 160);
        assert_eq!(policy.promotion.year_two_required_credits(), 16.0);
        assert_eq!(policy.promotion.year_three_required_credits(), 38.4);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let raw = r#"{ "attendance": { "total_working_days": 100 } }"#;
        let policy = PolicyTable::from_json_str(raw).expect("partial policy parses");
        assert_eq!(policy.attendance.total_working_days, 100);
        assert_eq!(policy.attendance.min_required, 75.0);
        assert_eq!(policy.grading_scale, grade::urr24_scale());
    }

    #[test]
    fn legacy_credit_base_can_be_selected() {
        let raw = format!(
            r#"{{ "promotion": {{ "year_one_credits": {LEGACY_YEAR_ONE_CREDITS}, "year_one_and_two_credits": {LEGACY_YEAR_ONE_AND_TWO_CREDITS} }} }}"#
        );
        let policy = PolicyTable::from_json_str(&raw).expect("legacy credits parse");
        assert_eq!(policy.promotion.year_two_required_credits(), 20.0);
        assert_eq!(policy.promotion.year_three_required_credits(), 48.0);
    }

    #[test]
    fn rejects_unsorted_scale() {
        let mut policy = PolicyTable::urr24();
        policy.grading_scale.swap(0, 1);
        match policy.validate() {
            Err(PolicyError::UnsortedGradingScale { previous, next }) => {
                assert_eq!(previous, 80.0);
                assert_eq!(next, 90.0);
            }
            other => panic!("expected unsorted scale error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_scale_without_zero_floor() {
        let mut policy = PolicyTable::urr24();
        policy.grading_scale.pop();
        match policy.validate() {
            Err(PolicyError::MissingZeroFloor { found }) => assert_eq!(found, 40.0),
            other => panic!("expected missing floor error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_scale_and_excess_points() {
        let mut policy = PolicyTable::urr24();
        policy.grading_scale.clear();
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::EmptyGradingScale)
        ));

        let mut policy = PolicyTable::urr24();
        policy.grading_scale[0].points = 11;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::PointsOutOfRange { grade: Grade::S, points: 11 })
        ));
    }

    #[test]
    fn rejects_inverted_attendance_bands() {
        let mut policy = PolicyTable::urr24();
        policy.attendance.condonation_min = 80.0;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::InvertedAttendanceBands { .. })
        ));
    }

    #[test]
    fn rejects_zero_working_days() {
        let raw = r#"{ "attendance": { "total_working_days": 0 } }"#;
        match PolicyTable::from_json_str(raw) {
            Err(PolicyError::ZeroCount { field }) => {
                assert_eq!(field, "attendance.total_working_days")
            }
            other => panic!("expected zero count error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            PolicyTable::from_json_str("{ not json"),
            Err(PolicyError::Parse(_))
        ));
    }
}
