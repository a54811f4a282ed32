use super::common::*;
use crate::policy::{Grade, GradeBand, PolicyTable};
use crate::rules::{aggregate_cie, final_total, EseRequirement, GradeResult, RulesEngine};

#[test]
fn band_floors_belong_to_the_higher_band() {
    let engine = engine();

    assert_eq!(engine.resolve_grade(90.0).grade, Grade::S);
    assert_eq!(engine.resolve_grade(89.999).grade, Grade::APlus);
    assert_eq!(engine.resolve_grade(89.99).grade, Grade::APlus);
    assert_eq!(engine.resolve_grade(40.0).grade, Grade::P);
    assert_eq!(engine.resolve_grade(39.999).grade, Grade::F);
    assert_eq!(engine.resolve_grade(0.0).grade, Grade::F);
}

#[test]
fn every_configured_floor_resolves_to_its_own_band() {
    let engine = engine();

    for band in &engine.policy().grading_scale {
        assert_eq!(
            engine.resolve_grade(band.min_percentage),
            GradeResult {
                grade: band.grade,
                points: band.points
            }
        );
    }
}

#[test]
fn out_of_range_percentages_use_the_nearest_band() {
    let engine = engine();

    assert_eq!(
        engine.resolve_grade(-5.0),
        GradeResult {
            grade: Grade::F,
            points: 0
        }
    );
    assert_eq!(engine.resolve_grade(120.0).grade, Grade::S);
    assert_eq!(engine.resolve_grade(f64::NAN).grade, Grade::F);
}

#[test]
fn points_never_decrease_as_percentage_rises() {
    let engine = engine();
    let mut previous = engine.resolve_grade(-10.0).points;

    for step in -40..=440 {
        let percentage = step as f64 * 0.25;
        let points = engine.resolve_grade(percentage).points;
        assert!(
            points >= previous,
            "points dropped from {previous} to {points} at {percentage}"
        );
        previous = points;
    }
}

#[test]
fn alternate_policy_tables_can_be_injected() {
    let mut policy = PolicyTable::urr24();
    policy.grading_scale = vec![
        GradeBand::new(Grade::P, 50.0, 4),
        GradeBand::new(Grade::F, 0.0, 0),
    ];
    let engine = RulesEngine::try_new(policy).expect("two band policy validates");

    assert_eq!(engine.resolve_grade(95.0).grade, Grade::P);
    assert_eq!(engine.resolve_grade(49.0).grade, Grade::F);
}

#[test]
fn cie_and_final_totals_follow_the_components() {
    let course = bee();
    assert_eq!(aggregate_cie(&course), 128.0);
    assert_eq!(final_total(&course), 128.0);

    let course = course.with_end_sem(80.0);
    assert_eq!(final_total(&course), 208.0);

    let engine = engine();
    assert_close(engine.course_percentage(&course), 83.2);
    assert_eq!(
        engine.course_grade(&course),
        Some(GradeResult {
            grade: Grade::APlus,
            points: 9
        })
    );
    assert_eq!(engine.course_grade(&bee()), None);
}

#[test]
fn predicted_grade_reports_percentage_and_points() {
    let prediction = engine().predict_final_grade(128.0, 72.0);

    assert_eq!(prediction.grade, Grade::APlus);
    assert_eq!(prediction.points, 9);
    assert_close(prediction.percentage, 80.0);
}

#[test]
fn required_ese_inverts_the_percentage_formula() {
    let engine = engine();

    assert_eq!(
        engine.required_ese(128.0, 90.0),
        EseRequirement::Required { score: 97.0 }
    );
    assert_eq!(
        engine.required_ese(100.0, 90.0),
        EseRequirement::Unreachable { required: 125.0 }
    );
    assert_eq!(engine.required_ese(141.0, 40.0), EseRequirement::Guaranteed);
}

#[test]
fn required_ese_boundaries_are_inclusive() {
    let engine = engine();

    assert_eq!(
        engine.required_ese(125.0, 90.0),
        EseRequirement::Required { score: 100.0 }
    );
    assert_eq!(engine.required_ese(100.0, 40.0), EseRequirement::Guaranteed);
}

#[test]
fn ese_targets_cover_every_passing_grade() {
    let targets = engine().ese_targets(128.0);

    let grades: Vec<Grade> = targets.iter().map(|target| target.grade).collect();
    assert_eq!(
        grades,
        vec![
            Grade::S,
            Grade::APlus,
            Grade::A,
            Grade::BPlus,
            Grade::B,
            Grade::C,
            Grade::P
        ]
    );
    assert_eq!(
        targets[0].requirement,
        EseRequirement::Required { score: 97.0 }
    );
    assert_eq!(targets[6].requirement, EseRequirement::Guaranteed);
}
