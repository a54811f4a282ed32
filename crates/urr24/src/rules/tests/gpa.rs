use super::common::*;
use crate::rules::{SemesterRecord, SemesterSummary};

#[test]
fn sgpa_is_credit_weighted() {
    let engine = engine();
    // 230/250 = 92% (S, 10 points); 130/250 = 52% (B, 6 points).
    let courses = vec![
        graded("DAA", 140.0, 90.0, 4),
        graded("OS", 80.0, 50.0, 3),
    ];

    assert_close(engine.compute_sgpa(&courses), (10.0 * 4.0 + 6.0 * 3.0) / 7.0);
}

#[test]
fn pending_courses_are_excluded_from_both_sides() {
    let engine = engine();
    let courses = vec![
        graded("DAA", 140.0, 90.0, 4),
        graded("OS", 80.0, 50.0, 3),
        pending("CN", 20.0, 4),
    ];

    let summary = engine.summarize_semester(&courses);

    assert_close(summary.sgpa, 58.0 / 7.0);
    assert_eq!(summary.published_credits, 7);
    assert_eq!(summary.pending_courses, 1);
}

#[test]
fn no_contributing_credits_yields_zero() {
    let engine = engine();

    assert_eq!(engine.compute_sgpa(&[]), 0.0);
    assert_eq!(
        engine.summarize_semester(&[pending("CN", 120.0, 4)]),
        SemesterSummary {
            sgpa: 0.0,
            published_credits: 0,
            pending_courses: 1,
        }
    );
    assert_eq!(engine.compute_cgpa(&[]), 0.0);
    assert_eq!(engine.compute_cgpa(&[SemesterRecord::new(9.0, 0)]), 0.0);
}

#[test]
fn cgpa_weights_semesters_by_credits() {
    let engine = engine();
    let semesters = [
        SemesterRecord::new(8.5, 20),
        SemesterRecord::new(9.0, 20),
        SemesterRecord::new(6.0, 0),
    ];

    assert_close(engine.compute_cgpa(&semesters), 8.75);
}

#[test]
fn predicted_cgpa_blends_one_semester() {
    let engine = engine();

    assert_close(engine.predict_cgpa(8.0, 32, 9.0, 16), 400.0 / 48.0);
    assert_close(engine.predict_cgpa(8.42, 64, 8.42, 64), 8.42);
}

#[test]
fn predicted_cgpa_without_credits_keeps_current_value() {
    assert_eq!(engine().predict_cgpa(7.25, 0, 9.5, 0), 7.25);
}
