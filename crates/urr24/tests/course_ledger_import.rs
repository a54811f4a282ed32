use std::io::Write;

use urr24::intake::{CourseIntake, CourseLedgerImporter, LedgerError, MarksViolation};
use urr24::rules::EndSemester;

#[test]
fn importer_reads_ledger_from_disk() {
    let path = std::env::temp_dir().join(format!("urr24-ledger-{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("temp ledger created");
        file.write_all(include_bytes!("fixtures/semester_four.csv"))
            .expect("temp ledger written");
    }

    let courses =
        CourseLedgerImporter::from_path(&path, &CourseIntake::default()).expect("ledger imports");
    std::fs::remove_file(&path).ok();

    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0].name, "Design & Analysis of Algorithms");
    assert_eq!(courses[0].cie.total(), 140.0);
    assert_eq!(courses[0].credits, 4);
    assert_eq!(courses[2].end_sem_exam, EndSemester::Pending);
}

#[test]
fn importer_reports_missing_file() {
    let result = CourseLedgerImporter::from_path(
        "/nonexistent/urr24/ledger.csv",
        &CourseIntake::default(),
    );
    assert!(matches!(result, Err(LedgerError::Io(_))));
}

#[test]
fn importer_rejects_rows_without_a_course_name() {
    let csv = "Course,Minor I,Minor II,MSE,GCBAA,ESE,Credits\n,19,14,45,50,80,4\n";

    match CourseLedgerImporter::from_reader(csv.as_bytes(), &CourseIntake::default()) {
        Err(LedgerError::Row {
            row: 1,
            source: MarksViolation::MissingName,
        }) => {}
        other => panic!("expected missing name on row 1, got {other:?}"),
    }
}
