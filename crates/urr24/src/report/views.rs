use crate::policy::Grade;
use crate::rules::{
    AttendanceZone, CondonationEligibility, EligibilityVerdict, EseTarget, SemesterSummary,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CourseStanding {
    Graded { grade: Grade, points: u8 },
    Pending { ese_targets: Vec<EseTarget> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRow {
    pub name: String,
    pub credits: u32,
    pub cie: f64,
    /// CIE as a share of the internal-assessment maximum.
    pub cie_percentage: f64,
    pub total: f64,
    pub percentage: f64,
    pub standing: CourseStanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecoveryPlan {
    pub classes_needed: i64,
    pub days_estimate: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub percentage: f64,
    pub zone: AttendanceZone,
    pub zone_label: &'static str,
    pub condonation: CondonationEligibility,
    pub classes_to_target: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_bunks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes_to_recover: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDashboard {
    pub name: String,
    pub as_of: NaiveDate,
    pub semester_number: u32,
    pub semester: SemesterSummary,
    pub cgpa: f64,
    pub projected_cgpa: f64,
    pub courses: Vec<CourseRow>,
    pub attendance: AttendanceSummary,
    pub promotion: EligibilityVerdict,
    pub honors: EligibilityVerdict,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}
