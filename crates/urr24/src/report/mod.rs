//! Student dashboard assembled from every rules-engine component.

mod views;

pub use views::{AttendanceSummary, CourseRow, CourseStanding, RecoveryPlan, StudentDashboard};

use crate::rules::{
    aggregate_cie, attendance_percentage, final_total, to_percentage, AttendanceZone, Course,
    EseRequirement, RulesEngine, StudentProgress,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw class counts, when the caller has them rather than just a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub attended: u32,
    pub held: u32,
}

/// Everything the dashboard needs about one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    pub name: String,
    pub progress: StudentProgress,
    pub courses: Vec<Course>,
    #[serde(default)]
    pub attendance: Option<AttendanceRecord>,
}

impl RulesEngine {
    pub fn dashboard(&self, snapshot: &StudentSnapshot, as_of: NaiveDate) -> StudentDashboard {
        let progress = &snapshot.progress;
        let semester = self.summarize_semester(&snapshot.courses);
        let projected_cgpa = self.predict_cgpa(
            progress.cgpa,
            progress.credits_earned,
            semester.sgpa,
            semester.published_credits,
        );

        let courses: Vec<CourseRow> = snapshot
            .courses
            .iter()
            .map(|course| self.course_row(course))
            .collect();
        let attendance =
            self.attendance_summary(progress.attendance_percentage, snapshot.attendance, as_of);
        let promotion = self.check_promotion(progress);
        let honors = self.check_honors(progress);

        let mut dashboard = StudentDashboard {
            name: snapshot.name.clone(),
            as_of,
            semester_number: progress.semester_number,
            semester,
            cgpa: progress.cgpa,
            projected_cgpa,
            courses,
            attendance,
            promotion,
            honors,
            advisories: Vec::new(),
        };
        dashboard.advisories = self.advisories(&dashboard);

        debug!(
            student = %dashboard.name,
            sgpa = dashboard.semester.sgpa,
            zone = dashboard.attendance.zone_label,
            promotion = dashboard.promotion.eligible,
            "dashboard assembled"
        );

        dashboard
    }

    /// One course line: marks, and either the grade or the ESE targets still open.
    pub fn course_row(&self, course: &Course) -> CourseRow {
        let cie = aggregate_cie(course);
        let standing = match self.course_grade(course) {
            Some(result) => CourseStanding::Graded {
                grade: result.grade,
                points: result.points,
            },
            None => CourseStanding::Pending {
                ese_targets: self.ese_targets(cie),
            },
        };

        CourseRow {
            name: course.name.clone(),
            credits: course.credits,
            cie,
            cie_percentage: to_percentage(cie, self.policy().marks.cie_max()),
            total: final_total(course),
            percentage: self.course_percentage(course),
            standing,
        }
    }

    /// Attendance standing as of `as_of`. Class counts, when present, take precedence over
    /// `reported_percentage`.
    pub fn attendance_summary(
        &self,
        reported_percentage: f64,
        record: Option<AttendanceRecord>,
        as_of: NaiveDate,
    ) -> AttendanceSummary {
        let policy = &self.policy().attendance;
        let days = policy.total_working_days;
        let percentage = record
            .map(|record| attendance_percentage(record.attended, record.held))
            .unwrap_or(reported_percentage);
        let zone = self.classify_attendance(percentage);

        let recovery = (zone != AttendanceZone::Safe).then(|| {
            let attended = record.map(|record| record.attended).unwrap_or_else(|| {
                (percentage / 100.0 * days as f64).round().max(0.0) as u32
            });
            let projection =
                self.classes_needed_to_attend(percentage, policy.min_required, days, attended);
            RecoveryPlan {
                classes_needed: projection.classes_needed,
                days_estimate: projection.days_estimate,
                target_date: Duration::try_days(projection.days_estimate)
                    .and_then(|offset| as_of.checked_add_signed(offset)),
            }
        });

        AttendanceSummary {
            percentage,
            zone,
            zone_label: zone.label(),
            condonation: self.condonation_eligibility(percentage),
            classes_to_target: self.classes_required_for_target(
                percentage,
                policy.min_required,
                days,
            ),
            safe_bunks: record
                .map(|record| self.max_missable_classes(record.attended, record.held)),
            classes_to_recover: record
                .and_then(|record| self.classes_to_recover(record.attended, record.held)),
            recovery,
        }
    }

    fn advisories(&self, dashboard: &StudentDashboard) -> Vec<String> {
        let policy = &self.policy().attendance;
        let attendance = &dashboard.attendance;
        let mut advisories = Vec::new();

        match attendance.zone {
            AttendanceZone::Safe => {}
            AttendanceZone::Condonation => advisories.push(format!(
                "Attendance {:.1}% needs condonation: submit a medical certificate and pay the fee within 7 days of semester end.",
                attendance.percentage
            )),
            AttendanceZone::Detention => advisories.push(format!(
                "Attendance {:.1}% is below the {}% detention threshold.",
                attendance.percentage, policy.detention_threshold
            )),
        }

        if let Some(classes) = attendance.classes_to_recover.filter(|classes| *classes > 0) {
            advisories.push(format!(
                "Attend the next {classes} classes without a break to reach {}%.",
                policy.min_required
            ));
        }

        if !dashboard.promotion.eligible {
            advisories.push(format!("Promotion at risk: {}", dashboard.promotion.reason));
        }

        for row in &dashboard.courses {
            if let CourseStanding::Pending { ese_targets } = &row.standing {
                let best = ese_targets.iter().find(|target| {
                    !matches!(target.requirement, EseRequirement::Unreachable { .. })
                });
                match best {
                    Some(target) => advisories.push(format!(
                        "{}: best reachable grade {} ({}).",
                        row.name,
                        target.grade,
                        target.requirement.summary()
                    )),
                    None => advisories.push(format!(
                        "{}: no passing grade is reachable through the ESE alone.",
                        row.name
                    )),
                }
            }
        }

        advisories
    }
}
