use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grades awarded under URR24, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "P")]
    P,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::P => "P",
            Self::F => "F",
        }
    }

    pub const fn is_pass(self) -> bool {
        !matches!(self, Self::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the grading scale: the floor percentage (inclusive) and its grade points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub grade: Grade,
    pub min_percentage: f64,
    pub points: u8,
}

impl GradeBand {
    pub const fn new(grade: Grade, min_percentage: f64, points: u8) -> Self {
        Self {
            grade,
            min_percentage,
            points,
        }
    }
}

pub(crate) fn urr24_scale() -> Vec<GradeBand> {
    vec![
        GradeBand::new(Grade::S, 90.0, 10),
        GradeBand::new(Grade::APlus, 80.0, 9),
        GradeBand::new(Grade::A, 70.0, 8),
        GradeBand::new(Grade::BPlus, 60.0, 7),
        GradeBand::new(Grade::B, 50.0, 6),
        GradeBand::new(Grade::C, 45.0, 5),
        GradeBand::new(Grade::P, 40.0, 4),
        GradeBand::new(Grade::F, 0.0, 0),
    ]
}
