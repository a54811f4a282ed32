mod attendance;
mod gpa;
mod grading;
mod marks;
mod promotion;

#[cfg(test)]
mod tests;

pub use attendance::{
    attendance_after_absences, attendance_percentage, classes_required_for_target,
    AttendanceProjection, AttendanceZone, CondonationEligibility, CondonationStatus,
};
pub use gpa::{compute_cgpa, predict_cgpa, SemesterRecord, SemesterSummary};
pub use grading::GradeResult;
pub use marks::{
    aggregate_cie, final_total, to_percentage, CieComponents, Course, EndSemester, EseRequirement,
    EseTarget, GradePrediction, DEFAULT_CREDITS,
};
pub use promotion::{
    Bound, EligibilityVerdict, PromotionCheckpoint, RequirementCheck, StudentProgress,
};

use crate::policy::{PolicyError, PolicyTable};

/// Stateless evaluator that applies a policy table to caller-supplied records.
///
/// Holds nothing but the immutable policy, so one instance can be shared freely across
/// threads and every call is referentially transparent.
#[derive(Debug, Clone, Default)]
pub struct RulesEngine {
    policy: PolicyTable,
}

impl RulesEngine {
    pub fn new(policy: PolicyTable) -> Self {
        Self { policy }
    }

    /// Validate the policy before accepting it.
    pub fn try_new(policy: PolicyTable) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self::new(policy))
    }

    pub fn urr24() -> Self {
        Self::new(PolicyTable::urr24())
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    pub fn resolve_grade(&self, percentage: f64) -> GradeResult {
        grading::resolve_grade(&self.policy.grading_scale, percentage)
    }

    /// Final-total percentage of a course against full marks.
    pub fn course_percentage(&self, course: &Course) -> f64 {
        marks::course_percentage(&self.policy, course)
    }

    /// Grade for a course whose ESE has been published; `None` while pending.
    pub fn course_grade(&self, course: &Course) -> Option<GradeResult> {
        course
            .end_sem_exam
            .is_published()
            .then(|| self.resolve_grade(self.course_percentage(course)))
    }

    pub fn predict_final_grade(&self, cie: f64, expected_ese: f64) -> GradePrediction {
        marks::predict_final_grade(&self.policy, cie, expected_ese)
    }

    pub fn required_ese(&self, cie: f64, target_percentage: f64) -> EseRequirement {
        marks::required_ese(&self.policy, cie, target_percentage)
    }

    pub fn ese_targets(&self, cie: f64) -> Vec<EseTarget> {
        marks::ese_targets(&self.policy, cie)
    }

    pub fn compute_sgpa(&self, courses: &[Course]) -> f64 {
        gpa::compute_sgpa(&self.policy, courses)
    }

    pub fn summarize_semester(&self, courses: &[Course]) -> SemesterSummary {
        gpa::summarize_semester(&self.policy, courses)
    }

    pub fn compute_cgpa(&self, semesters: &[SemesterRecord]) -> f64 {
        compute_cgpa(semesters)
    }

    pub fn predict_cgpa(
        &self,
        current_cgpa: f64,
        current_credits: u32,
        predicted_sgpa: f64,
        semester_credits: u32,
    ) -> f64 {
        predict_cgpa(current_cgpa, current_credits, predicted_sgpa, semester_credits)
    }

    pub fn classify_attendance(&self, percentage: f64) -> AttendanceZone {
        attendance::classify(&self.policy.attendance, percentage)
    }

    pub fn classes_required_for_target(
        &self,
        current_percentage: f64,
        target_percentage: f64,
        total_working_days: u32,
    ) -> i64 {
        classes_required_for_target(current_percentage, target_percentage, total_working_days)
    }

    pub fn max_missable_classes(&self, attended: u32, total: u32) -> u32 {
        attendance::max_missable_classes(&self.policy.attendance, attended, total)
    }

    pub fn classes_to_recover(&self, attended: u32, total: u32) -> Option<u32> {
        attendance::classes_to_recover(&self.policy.attendance, attended, total)
    }

    pub fn classes_needed_to_attend(
        &self,
        current_percentage: f64,
        target_percentage: f64,
        total_working_days: u32,
        classes_attended: u32,
    ) -> AttendanceProjection {
        attendance::classes_needed_to_attend(
            &self.policy.attendance,
            current_percentage,
            target_percentage,
            total_working_days,
            classes_attended,
        )
    }

    pub fn condonation_eligibility(&self, percentage: f64) -> CondonationEligibility {
        attendance::condonation_eligibility(&self.policy.attendance, percentage)
    }

    pub fn check_promotion(&self, progress: &StudentProgress) -> EligibilityVerdict {
        promotion::check_promotion(&self.policy.promotion, progress)
    }

    pub fn check_honors(&self, progress: &StudentProgress) -> EligibilityVerdict {
        promotion::check_honors(&self.policy.honors, progress)
    }
}
