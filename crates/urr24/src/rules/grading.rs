use crate::policy::{Grade, GradeBand};
use serde::{Deserialize, Serialize};

/// Grade and grade points awarded for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub grade: Grade,
    pub points: u8,
}

impl From<&GradeBand> for GradeResult {
    fn from(band: &GradeBand) -> Self {
        Self {
            grade: band.grade,
            points: band.points,
        }
    }
}

/// First band (scanning downwards) whose floor the percentage reaches. Anything under every
/// floor, NaN included, lands in the last band.
pub(crate) fn resolve_grade(scale: &[GradeBand], percentage: f64) -> GradeResult {
    scale
        .iter()
        .find(|band| percentage >= band.min_percentage)
        .or_else(|| scale.last())
        .map(GradeResult::from)
        .unwrap_or(GradeResult {
            grade: Grade::F,
            points: 0,
        })
}
