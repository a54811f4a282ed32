//! Attendance compliance and projections.
//!
//! Every projection is closed form. `classes_required_for_target` keeps the working-day
//! calendar fixed (attending more does not grow the denominator); `classes_to_recover` models
//! the denominator growing with each class attended.

use crate::policy::AttendancePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceZone {
    Safe,
    Condonation,
    Detention,
}

impl AttendanceZone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe Zone",
            Self::Condonation => "Condonation Risk",
            Self::Detention => "Detention Imminent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CondonationStatus {
    NotNeeded,
    Eligible,
    TooLow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondonationEligibility {
    pub eligible: bool,
    pub status: CondonationStatus,
    pub reason: String,
}

/// Classes still to attend, and the calendar days that takes at the institutional cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceProjection {
    pub classes_needed: i64,
    pub days_estimate: i64,
    pub projected_attended: u32,
}

impl AttendanceProjection {
    pub fn goal_met(&self) -> bool {
        self.classes_needed <= 0
    }
}

pub(crate) fn classify(policy: &AttendancePolicy, percentage: f64) -> AttendanceZone {
    if percentage >= policy.min_required {
        AttendanceZone::Safe
    } else if percentage >= policy.condonation_min {
        AttendanceZone::Condonation
    } else {
        AttendanceZone::Detention
    }
}

/// 0 when no classes have been held.
pub fn attendance_percentage(attended: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    attended as f64 / total as f64 * 100.0
}

/// Percentage after `absences` further classes are held and missed.
pub fn attendance_after_absences(attended: u32, total: u32, absences: u32) -> f64 {
    attendance_percentage(attended, total.saturating_add(absences))
}

/// Non-positive results mean the target is already met.
pub fn classes_required_for_target(
    current_percentage: f64,
    target_percentage: f64,
    total_working_days: u32,
) -> i64 {
    let days = total_working_days as f64;
    let current_classes = current_percentage / 100.0 * days;
    let target_classes = target_percentage / 100.0 * days;
    (target_classes - current_classes).ceil() as i64
}

/// Largest k with attended / (total + k) still at or above the minimum ("safe bunks").
pub(crate) fn max_missable_classes(policy: &AttendancePolicy, attended: u32, total: u32) -> u32 {
    let ceiling = attended as f64 * 100.0 / policy.min_required - total as f64;
    if ceiling <= 0.0 {
        return 0;
    }
    ceiling.floor().min(u32::MAX as f64) as u32
}

/// Smallest x with (attended + x) / (total + x) at or above the minimum. `None` when no number
/// of extra classes gets there (a 100% requirement with an absence already on record).
pub(crate) fn classes_to_recover(
    policy: &AttendancePolicy,
    attended: u32,
    total: u32,
) -> Option<u32> {
    let shortfall = policy.min_required * total as f64 - 100.0 * attended as f64;
    if shortfall <= 0.0 {
        return Some(0);
    }

    let gain_per_class = 100.0 - policy.min_required;
    if gain_per_class <= 0.0 {
        return None;
    }

    Some((shortfall / gain_per_class).ceil().min(u32::MAX as f64) as u32)
}

pub(crate) fn classes_needed_to_attend(
    policy: &AttendancePolicy,
    current_percentage: f64,
    target_percentage: f64,
    total_working_days: u32,
    classes_attended: u32,
) -> AttendanceProjection {
    let classes_needed =
        classes_required_for_target(current_percentage, target_percentage, total_working_days);
    let outstanding = classes_needed.max(0);
    let weeks = (outstanding as f64 / policy.classes_per_week as f64).ceil() as i64;

    AttendanceProjection {
        classes_needed,
        days_estimate: weeks.saturating_mul(policy.days_per_week as i64),
        projected_attended: classes_attended
            .saturating_add(outstanding.min(u32::MAX as i64) as u32),
    }
}

pub(crate) fn condonation_eligibility(
    policy: &AttendancePolicy,
    percentage: f64,
) -> CondonationEligibility {
    match classify(policy, percentage) {
        AttendanceZone::Safe => CondonationEligibility {
            eligible: false,
            status: CondonationStatus::NotNeeded,
            reason: format!(
                "attendance {percentage:.2}% meets the {}% minimum; condonation not needed",
                policy.min_required
            ),
        },
        AttendanceZone::Condonation => CondonationEligibility {
            eligible: true,
            status: CondonationStatus::Eligible,
            reason: format!(
                "attendance {percentage:.2}% is within the condonation band ({}% to {}%); medical certificate and fee required",
                policy.condonation_min, policy.min_required
            ),
        },
        AttendanceZone::Detention => CondonationEligibility {
            eligible: false,
            status: CondonationStatus::TooLow,
            reason: format!(
                "attendance {percentage:.2}% is below the {}% condonation floor; ineligible",
                policy.condonation_min
            ),
        },
    }
}
