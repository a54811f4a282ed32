use super::common::*;
use crate::rules::PromotionCheckpoint;

#[test]
fn year_one_allows_up_to_five_backlogs() {
    let engine = engine();

    let blocked = engine.check_promotion(&progress(2, 6, 0));
    assert!(!blocked.eligible);
    assert_eq!(
        blocked.reason,
        "You have 6 backlogs. Must clear all courses OR max 5 backlogs"
    );
    assert_eq!(
        blocked.requirement_details,
        vec!["[unsatisfied] backlogs: 6 (maximum 5)".to_string()]
    );

    let promoted = engine.check_promotion(&progress(2, 5, 0));
    assert!(promoted.eligible);
    assert_eq!(
        promoted.requirement_details,
        vec!["[satisfied] backlogs: 5 (maximum 5)".to_string()]
    );
}

#[test]
fn year_two_needs_half_of_year_one_credits() {
    let engine = engine();

    assert!(engine.check_promotion(&progress(4, 0, 16)).eligible);

    let short = engine.check_promotion(&progress(4, 0, 15));
    assert!(!short.eligible);
    assert_eq!(short.reason, "You need 16 credits from Year 1. Currently: 15");
    assert_eq!(short.checks.len(), 1);
    assert_eq!(short.checks[0].threshold, 16.0);
    assert_eq!(short.checks[0].observed, 15.0);
}

#[test]
fn year_three_needs_sixty_percent_of_years_one_and_two() {
    let engine = engine();

    let short = engine.check_promotion(&progress(6, 0, 38));
    assert!(!short.eligible);
    assert_eq!(
        short.requirement_details,
        vec!["[unsatisfied] credits earned from years 1 and 2: 38 (minimum 38.4)".to_string()]
    );

    assert!(engine.check_promotion(&progress(6, 0, 39)).eligible);
}

#[test]
fn other_semesters_have_no_checkpoint() {
    let engine = engine();

    for semester in [1, 3, 5, 7, 8] {
        assert_eq!(PromotionCheckpoint::for_semester(semester), None);
        let verdict = engine.check_promotion(&progress(semester, 9, 0));
        assert!(verdict.eligible);
        assert_eq!(verdict.reason, "no check applicable");
        assert!(verdict.requirement_details.is_empty());
    }
}

#[test]
fn legacy_credit_base_raises_thresholds() {
    let engine = legacy_credit_engine();

    assert!(!engine.check_promotion(&progress(4, 0, 16)).eligible);
    assert!(engine.check_promotion(&progress(4, 0, 20)).eligible);
    assert!(!engine.check_promotion(&progress(6, 0, 47)).eligible);
}

#[test]
fn honors_requires_cgpa_and_clean_record() {
    let engine = engine();

    let mut student = progress(4, 0, 32);
    student.cgpa = 8.42;
    let verdict = engine.check_honors(&student);
    assert!(verdict.eligible);
    assert_eq!(verdict.requirement_details.len(), 2);
    assert!(verdict.reason.contains("18 to 20 extra credits"));

    student.cgpa = 6.9;
    student.backlog_count = 1;
    let verdict = engine.check_honors(&student);
    assert!(!verdict.eligible);
    assert_eq!(
        verdict.reason,
        "Honors / Minor track requires CGPA and backlogs within policy"
    );
}
