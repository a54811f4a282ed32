use super::{CourseIntake, CourseSubmission, MarksViolation};
use crate::rules::Course;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("failed to read course ledger: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid course ledger CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("ledger row {row} rejected: {source}")]
    Row {
        row: usize,
        #[source]
        source: MarksViolation,
    },
}

/// Spreadsheet export of a semester's marks, one course per row.
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Course")]
    course: String,
    #[serde(rename = "Minor I", default)]
    minor_one: Option<f64>,
    #[serde(rename = "Minor II", default)]
    minor_two: Option<f64>,
    #[serde(rename = "MSE", default)]
    mid_sem_exam: Option<f64>,
    #[serde(rename = "GCBAA", default)]
    group_activity: Option<f64>,
    #[serde(rename = "ESE", default)]
    end_sem_exam: Option<f64>,
    #[serde(rename = "Credits", default)]
    credits: Option<u32>,
}

impl From<LedgerRow> for CourseSubmission {
    fn from(row: LedgerRow) -> Self {
        Self {
            name: row.course,
            minor_one: row.minor_one,
            minor_two: row.minor_two,
            mid_sem_exam: row.mid_sem_exam,
            group_activity: row.group_activity,
            end_sem_exam: row.end_sem_exam,
            credits: row.credits,
        }
    }
}

pub struct CourseLedgerImporter;

impl CourseLedgerImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        intake: &CourseIntake,
    ) -> Result<Vec<Course>, LedgerError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let courses = Self::from_reader(file, intake)?;
        info!(path = %path.display(), courses = courses.len(), "imported course ledger");
        Ok(courses)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        intake: &CourseIntake,
    ) -> Result<Vec<Course>, LedgerError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut courses = Vec::new();

        for (index, record) in csv_reader.deserialize::<LedgerRow>().enumerate() {
            let row = index + 1;
            let submission = CourseSubmission::from(record?);
            let course = intake
                .course_from_submission(submission)
                .map_err(|source| {
                    warn!(row, %source, "rejecting ledger row");
                    LedgerError::Row { row, source }
                })?;
            courses.push(course);
        }

        Ok(courses)
    }
}
