use crate::commands::{
    run_attendance, run_cgpa, run_course, run_grade, run_predict_cgpa, run_promotion, run_report,
    run_sgpa, AttendanceArgs, CgpaArgs, CourseArgs, GradeArgs, PredictCgpaArgs, ProgressArgs,
    ReportArgs, SgpaArgs,
};
use crate::infra::bootstrap;
use clap::{Parser, Subcommand};
use urr24::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "compass",
    about = "Apply the URR24 academic regulations to marks, attendance and credit records",
    version
)]
struct Cli {
    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map a final percentage onto the grading scale
    Grade(GradeArgs),
    /// Aggregate one course's marks and grade it, or show ESE targets while pending
    Course(CourseArgs),
    /// Compute SGPA from a course ledger CSV
    Sgpa(SgpaArgs),
    /// Compute CGPA from completed semesters
    Cgpa(CgpaArgs),
    /// Blend a predicted semester into the current CGPA
    PredictCgpa(PredictCgpaArgs),
    /// Classify attendance and plan recovery
    Attendance(AttendanceArgs),
    /// Check promotion and Honors / Minor eligibility
    Promotion(ProgressArgs),
    /// Assemble the full student dashboard from a snapshot file
    Report(ReportArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let engine = bootstrap()?;
    let json = cli.json;

    match cli.command {
        Command::Grade(args) => run_grade(&engine, args, json),
        Command::Course(args) => run_course(&engine, args, json),
        Command::Sgpa(args) => run_sgpa(&engine, args, json),
        Command::Cgpa(args) => run_cgpa(&engine, args, json),
        Command::PredictCgpa(args) => run_predict_cgpa(&engine, args, json),
        Command::Attendance(args) => run_attendance(&engine, args, json),
        Command::Promotion(args) => run_promotion(&engine, args, json),
        Command::Report(args) => run_report(&engine, args, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("compass").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn parses_cgpa_semesters() {
        let cli = parse(&["cgpa", "8.5:20", "9:22", "--json"]);
        assert!(cli.json);
        match cli.command {
            Command::Cgpa(args) => assert_eq!(args.semesters.len(), 2),
            other => panic!("expected cgpa command, got {other:?}"),
        }
    }

    #[test]
    fn attendance_accepts_counts_or_percentage() {
        match parse(&["attendance", "--attended", "58", "--held", "80"]).command {
            Command::Attendance(args) => {
                assert_eq!(args.attended, Some(58));
                assert_eq!(args.held, Some(80));
            }
            other => panic!("expected attendance command, got {other:?}"),
        }
        match parse(&["attendance", "--percentage", "72.5"]).command {
            Command::Attendance(args) => assert_eq!(args.percentage, Some(72.5)),
            other => panic!("expected attendance command, got {other:?}"),
        }
    }

    #[test]
    fn attendance_accepts_negative_percentages() {
        match parse(&["attendance", "--percentage", "-5"]).command {
            Command::Attendance(args) => assert_eq!(args.percentage, Some(-5.0)),
            other => panic!("expected attendance command, got {other:?}"),
        }
    }

    #[test]
    fn attendance_rejects_mixed_inputs() {
        let result = Cli::try_parse_from([
            "compass",
            "attendance",
            "--attended",
            "58",
            "--held",
            "80",
            "--percentage",
            "72.5",
        ]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["compass", "attendance", "--attended", "58"]).is_err());
        assert!(Cli::try_parse_from(["compass", "attendance"]).is_err());
    }

    #[test]
    fn report_parses_as_of_date() {
        match parse(&["report", "--snapshot", "student.json", "--as-of", "2024-05-10"]).command {
            Command::Report(args) => {
                assert_eq!(
                    args.as_of,
                    Some(NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid date"))
                );
                assert!(args.ledger.is_none());
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn promotion_requires_semester() {
        assert!(Cli::try_parse_from(["compass", "promotion", "--backlogs", "2"]).is_err());
        match parse(&["promotion", "--semester", "4", "--credits-earned", "30"]).command {
            Command::Promotion(args) => {
                assert_eq!(args.semester, 4);
                assert_eq!(args.backlogs, 0);
            }
            other => panic!("expected promotion command, got {other:?}"),
        }
    }
}
