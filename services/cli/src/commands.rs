use crate::infra::{parse_date, parse_semester, print_json};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use urr24::error::AppError;
use urr24::intake::{CourseIntake, CourseLedgerImporter, CourseSubmission};
use urr24::report::{
    AttendanceRecord, AttendanceSummary, CourseRow, CourseStanding, StudentDashboard,
    StudentSnapshot,
};
use urr24::rules::{
    attendance_after_absences, EligibilityVerdict, GradePrediction, GradeResult,
    PromotionCheckpoint, SemesterRecord, SemesterSummary, StudentProgress,
};
use urr24::RulesEngine;

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Final percentage (0-100)
    #[arg(allow_hyphen_values = true)]
    pub(crate) percentage: f64,
}

#[derive(Args, Debug)]
pub(crate) struct CourseArgs {
    /// Course name used in the output
    #[arg(long, default_value = "Course")]
    pub(crate) name: String,
    /// Minor I score (out of 25)
    #[arg(long)]
    pub(crate) minor_one: Option<f64>,
    /// Minor II score (out of 25)
    #[arg(long)]
    pub(crate) minor_two: Option<f64>,
    /// Mid-semester exam score (out of 50)
    #[arg(long = "mse")]
    pub(crate) mid_sem_exam: Option<f64>,
    /// Group activity score (out of 50)
    #[arg(long = "gcbaa")]
    pub(crate) group_activity: Option<f64>,
    /// Published end-semester exam score (out of 100)
    #[arg(long = "ese")]
    pub(crate) end_sem_exam: Option<f64>,
    /// Expected ESE score for a what-if grade prediction
    #[arg(long, conflicts_with = "end_sem_exam")]
    pub(crate) expected_ese: Option<f64>,
    /// Course credits (defaults to the policy value)
    #[arg(long)]
    pub(crate) credits: Option<u32>,
}

#[derive(Args, Debug)]
pub(crate) struct SgpaArgs {
    /// Course ledger CSV (Course, Minor I, Minor II, MSE, GCBAA, ESE, Credits)
    #[arg(long)]
    pub(crate) ledger: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CgpaArgs {
    /// Completed semesters as SGPA:CREDITS
    #[arg(required = true, value_parser = parse_semester)]
    pub(crate) semesters: Vec<SemesterRecord>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictCgpaArgs {
    /// Current CGPA
    #[arg(long)]
    pub(crate) cgpa: f64,
    /// Credits behind the current CGPA
    #[arg(long)]
    pub(crate) credits: u32,
    /// Expected SGPA for the coming semester
    #[arg(long)]
    pub(crate) sgpa: f64,
    /// Credits carried by the coming semester
    #[arg(long)]
    pub(crate) semester_credits: u32,
}

#[derive(Args, Debug)]
pub(crate) struct AttendanceArgs {
    /// Classes attended so far
    #[arg(long, requires = "held", required_unless_present = "percentage")]
    pub(crate) attended: Option<u32>,
    /// Classes held so far
    #[arg(long, requires = "attended")]
    pub(crate) held: Option<u32>,
    /// Attendance percentage when class counts are unknown
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["attended", "held"])]
    pub(crate) percentage: Option<f64>,
    /// Show the percentage after skipping this many more classes
    #[arg(long, requires = "held")]
    pub(crate) absences: Option<u32>,
    /// Date recovery estimates are counted from (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ProgressArgs {
    /// Semester just completed (1-8)
    #[arg(long)]
    pub(crate) semester: u32,
    /// Outstanding backlogs
    #[arg(long, default_value_t = 0)]
    pub(crate) backlogs: u32,
    /// Current CGPA
    #[arg(long, default_value_t = 0.0)]
    pub(crate) cgpa: f64,
    /// Credits earned so far
    #[arg(long, default_value_t = 0)]
    pub(crate) credits_earned: u32,
    /// Attendance percentage
    #[arg(long, default_value_t = 0.0)]
    pub(crate) attendance: f64,
}

impl From<&ProgressArgs> for StudentProgress {
    fn from(args: &ProgressArgs) -> Self {
        Self {
            semester_number: args.semester,
            backlog_count: args.backlogs,
            cgpa: args.cgpa,
            credits_earned: args.credits_earned,
            attendance_percentage: args.attendance,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Student snapshot JSON (name, progress, courses, optional attendance counts)
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Course ledger CSV replacing the snapshot's courses
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    /// Reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Serialize)]
struct CourseAssessment {
    #[serde(flatten)]
    row: CourseRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    prediction: Option<GradePrediction>,
}

#[derive(Serialize)]
struct SemesterReport {
    courses: Vec<CourseRow>,
    semester: SemesterSummary,
}

#[derive(Serialize)]
struct CgpaReport {
    cgpa: f64,
    credits: u32,
}

#[derive(Serialize)]
struct CgpaProjection {
    current_cgpa: f64,
    projected_cgpa: f64,
    total_credits: u32,
}

#[derive(Serialize)]
struct AttendanceReport {
    #[serde(flatten)]
    summary: AttendanceSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    after_absences: Option<f64>,
}

#[derive(Serialize)]
struct ProgressReport {
    promotion: EligibilityVerdict,
    honors: EligibilityVerdict,
}

fn intake_for(engine: &RulesEngine) -> CourseIntake {
    CourseIntake::with_policy(engine.policy().marks.clone())
}

pub(crate) fn run_grade(engine: &RulesEngine, args: GradeArgs, json: bool) -> Result<(), AppError> {
    let result: GradeResult = engine.resolve_grade(args.percentage);
    if json {
        return print_json(&result);
    }

    println!(
        "{:.2}% -> grade {} ({} points)",
        args.percentage, result.grade, result.points
    );
    Ok(())
}

pub(crate) fn run_course(
    engine: &RulesEngine,
    args: CourseArgs,
    json: bool,
) -> Result<(), AppError> {
    let course = intake_for(engine).course_from_submission(CourseSubmission {
        name: args.name,
        minor_one: args.minor_one,
        minor_two: args.minor_two,
        mid_sem_exam: args.mid_sem_exam,
        group_activity: args.group_activity,
        end_sem_exam: args.end_sem_exam,
        credits: args.credits,
    })?;

    let row = engine.course_row(&course);
    let prediction = args
        .expected_ese
        .map(|ese| engine.predict_final_grade(row.cie, ese));

    if json {
        return print_json(&CourseAssessment { row, prediction });
    }

    render_course_row(engine, &row);
    if let (Some(ese), Some(prediction)) = (args.expected_ese, prediction) {
        println!(
            "  With {ese:.1} in ESE: {:.2}% -> grade {} ({} points)",
            prediction.percentage, prediction.grade, prediction.points
        );
    }
    Ok(())
}

pub(crate) fn run_sgpa(engine: &RulesEngine, args: SgpaArgs, json: bool) -> Result<(), AppError> {
    let courses = CourseLedgerImporter::from_path(&args.ledger, &intake_for(engine))?;
    let report = SemesterReport {
        courses: courses.iter().map(|course| engine.course_row(course)).collect(),
        semester: engine.summarize_semester(&courses),
    };

    if json {
        return print_json(&report);
    }

    for row in &report.courses {
        println!("{}", course_line(row, engine.policy().marks.total_max()));
    }
    println!("{}", semester_line(&report.semester));
    Ok(())
}

pub(crate) fn run_cgpa(engine: &RulesEngine, args: CgpaArgs, json: bool) -> Result<(), AppError> {
    let report = CgpaReport {
        cgpa: engine.compute_cgpa(&args.semesters),
        credits: args.semesters.iter().map(|record| record.credits).sum(),
    };

    if json {
        return print_json(&report);
    }

    println!(
        "CGPA {:.2} over {} semesters ({} credits)",
        report.cgpa,
        args.semesters.len(),
        report.credits
    );
    Ok(())
}

pub(crate) fn run_predict_cgpa(
    engine: &RulesEngine,
    args: PredictCgpaArgs,
    json: bool,
) -> Result<(), AppError> {
    let projection = CgpaProjection {
        current_cgpa: args.cgpa,
        projected_cgpa: engine.predict_cgpa(
            args.cgpa,
            args.credits,
            args.sgpa,
            args.semester_credits,
        ),
        total_credits: args.credits.saturating_add(args.semester_credits),
    };

    if json {
        return print_json(&projection);
    }

    println!(
        "CGPA {:.2} -> {:.2} after a {:.2} SGPA semester ({} credits in total)",
        projection.current_cgpa,
        projection.projected_cgpa,
        args.sgpa,
        projection.total_credits
    );
    Ok(())
}

pub(crate) fn run_attendance(
    engine: &RulesEngine,
    args: AttendanceArgs,
    json: bool,
) -> Result<(), AppError> {
    let record = args
        .attended
        .zip(args.held)
        .map(|(attended, held)| AttendanceRecord { attended, held });
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let summary = engine.attendance_summary(args.percentage.unwrap_or_default(), record, as_of);
    let after_absences = record.zip(args.absences).map(|(record, absences)| {
        attendance_after_absences(record.attended, record.held, absences)
    });

    if json {
        return print_json(&AttendanceReport {
            summary,
            after_absences,
        });
    }

    render_attendance(engine, &summary);
    if let (Some(absences), Some(percentage)) = (args.absences, after_absences) {
        println!("  After {absences} more absences: {percentage:.2}%");
    }
    Ok(())
}

pub(crate) fn run_promotion(
    engine: &RulesEngine,
    args: ProgressArgs,
    json: bool,
) -> Result<(), AppError> {
    let progress = StudentProgress::from(&args);
    let report = ProgressReport {
        promotion: engine.check_promotion(&progress),
        honors: engine.check_honors(&progress),
    };

    if json {
        return print_json(&report);
    }

    let title = match PromotionCheckpoint::for_semester(progress.semester_number) {
        Some(checkpoint) => format!("Promotion {}", checkpoint.label()),
        None => format!("Promotion after semester {}", progress.semester_number),
    };
    render_verdict(&title, &report.promotion);
    render_verdict("Honors / Minor track", &report.honors);
    Ok(())
}

pub(crate) fn run_report(
    engine: &RulesEngine,
    args: ReportArgs,
    json: bool,
) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.snapshot)?;
    let mut snapshot: StudentSnapshot = serde_json::from_str(&raw)?;
    let intake = intake_for(engine);

    snapshot.courses = match &args.ledger {
        Some(path) => CourseLedgerImporter::from_path(path, &intake)?,
        None => snapshot
            .courses
            .into_iter()
            .map(|course| intake.course_from_submission(course.into()))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let dashboard = engine.dashboard(&snapshot, as_of);

    if json {
        return print_json(&dashboard);
    }

    render_dashboard(engine, &dashboard);
    Ok(())
}

fn course_line(row: &CourseRow, total_max: f64) -> String {
    match &row.standing {
        CourseStanding::Graded { grade, points } => format!(
            "- {} ({} cr): {:.1} / {} ({:.2}%) -> {} ({} points)",
            row.name, row.credits, row.total, total_max, row.percentage, grade, points
        ),
        CourseStanding::Pending { .. } => format!(
            "- {} ({} cr): CIE {:.1} ({:.1}%), ESE pending",
            row.name, row.credits, row.cie, row.cie_percentage
        ),
    }
}

fn semester_line(summary: &SemesterSummary) -> String {
    format!(
        "SGPA {:.2} over {} published credits ({} courses pending)",
        summary.sgpa, summary.published_credits, summary.pending_courses
    )
}

fn render_course_row(engine: &RulesEngine, row: &CourseRow) {
    let marks = &engine.policy().marks;
    println!("{} ({} credits)", row.name, row.credits);
    println!(
        "  CIE {:.1} / {} ({:.1}%)",
        row.cie,
        marks.cie_max(),
        row.cie_percentage
    );
    match &row.standing {
        CourseStanding::Graded { grade, points } => println!(
            "  Total {:.1} / {} ({:.2}%) -> grade {} ({} points)",
            row.total,
            marks.total_max(),
            row.percentage,
            grade,
            points
        ),
        CourseStanding::Pending { ese_targets } => {
            println!("  ESE pending. Targets:");
            for target in ese_targets {
                println!(
                    "    - {} (>= {}%): {}",
                    target.grade,
                    target.min_percentage,
                    target.requirement.summary()
                );
            }
        }
    }
}

fn render_attendance(engine: &RulesEngine, summary: &AttendanceSummary) {
    let minimum = engine.policy().attendance.min_required;
    println!("Attendance {:.2}% [{}]", summary.percentage, summary.zone_label);
    println!("  Condonation: {}", summary.condonation.reason);
    if summary.classes_to_target > 0 {
        println!(
            "  {} more classes needed to reach {}% of the working days",
            summary.classes_to_target, minimum
        );
    }
    if let Some(bunks) = summary.safe_bunks {
        println!("  Classes you can miss and stay at {minimum}%: {bunks}");
    }
    if let Some(classes) = summary.classes_to_recover.filter(|classes| *classes > 0) {
        println!("  Consecutive classes needed to recover {minimum}%: {classes}");
    }
    if let Some(plan) = &summary.recovery {
        match plan.target_date {
            Some(date) => println!(
                "  Recovery: {} classes over ~{} days (by {})",
                plan.classes_needed, plan.days_estimate, date
            ),
            None => println!(
                "  Recovery: {} classes over ~{} days",
                plan.classes_needed, plan.days_estimate
            ),
        }
    }
}

fn render_verdict(title: &str, verdict: &EligibilityVerdict) {
    let status = if verdict.eligible {
        "eligible"
    } else {
        "not eligible"
    };
    println!("{title}: {status}");
    println!("  {}", verdict.reason);
    for detail in &verdict.requirement_details {
        println!("  {detail}");
    }
}

fn render_dashboard(engine: &RulesEngine, dashboard: &StudentDashboard) {
    println!(
        "{} | semester {} | as of {}",
        dashboard.name, dashboard.semester_number, dashboard.as_of
    );
    println!(
        "CGPA {:.2} -> projected {:.2}",
        dashboard.cgpa, dashboard.projected_cgpa
    );

    println!("\nCourses");
    for row in &dashboard.courses {
        println!("{}", course_line(row, engine.policy().marks.total_max()));
    }
    println!("{}", semester_line(&dashboard.semester));

    println!();
    render_attendance(engine, &dashboard.attendance);

    println!();
    render_verdict("Promotion", &dashboard.promotion);
    render_verdict("Honors / Minor track", &dashboard.honors);

    if !dashboard.advisories.is_empty() {
        println!("\nAdvisories");
        for advisory in &dashboard.advisories {
            println!("- {advisory}");
        }
    }
}
