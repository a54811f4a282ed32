use crate::policy::{PolicyTable, LEGACY_YEAR_ONE_AND_TWO_CREDITS, LEGACY_YEAR_ONE_CREDITS};
use crate::rules::{CieComponents, Course, RulesEngine, StudentProgress};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn engine() -> RulesEngine {
    RulesEngine::urr24()
}

pub(super) fn legacy_credit_engine() -> RulesEngine {
    let mut policy = PolicyTable::urr24();
    policy.promotion.year_one_credits = LEGACY_YEAR_ONE_CREDITS;
    policy.promotion.year_one_and_two_credits = LEGACY_YEAR_ONE_AND_TWO_CREDITS;
    RulesEngine::try_new(policy).expect("legacy policy validates")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// CIE of 128 out of 150 (minors 19 + 14, MSE 45, GCBAA 50).
pub(super) fn bee() -> Course {
    Course::new("BEE", CieComponents::new(19.0, 14.0, 45.0, 50.0))
}

/// Course whose CIE components sum to `cie`, with the published ESE score.
pub(super) fn graded(name: &str, cie: f64, ese: f64, credits: u32) -> Course {
    Course::new(name, CieComponents::new(0.0, 0.0, 0.0, cie))
        .with_end_sem(ese)
        .with_credits(credits)
}

pub(super) fn pending(name: &str, cie: f64, credits: u32) -> Course {
    Course::new(name, CieComponents::new(0.0, 0.0, 0.0, cie)).with_credits(credits)
}

pub(super) fn progress(
    semester_number: u32,
    backlog_count: u32,
    credits_earned: u32,
) -> StudentProgress {
    StudentProgress {
        semester_number,
        backlog_count,
        cgpa: 8.0,
        credits_earned,
        attendance_percentage: 80.0,
    }
}
