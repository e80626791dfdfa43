use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One course entered in the current calculation session.
///
/// `grade_point` is derived from `score` when the record is created and is
/// never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: Uuid,
    pub name: String,
    pub unit: u32,
    pub score: f64,
    pub grade_point: u8,
}

/// Summary of a previously completed semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    pub id: Uuid,
    pub total_grade_points: f64,
    pub total_units: f64,
}

/// Total unit grade points and total units over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub grade_points: f64,
    pub units: f64,
}

impl Totals {
    pub fn combine(self, other: Totals) -> Totals {
        Totals {
            grade_points: self.grade_points + other.grade_points,
            units: self.units + other.units,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "First Class Honours")]
    FirstClass,
    #[serde(rename = "Second Class Honours (Upper Division)")]
    SecondClassUpper,
    #[serde(rename = "Second Class Honours (Lower Division)")]
    SecondClassLower,
    #[serde(rename = "Third Class Honours")]
    ThirdClass,
    #[serde(rename = "Pass")]
    Pass,
    #[serde(rename = "Fail")]
    Fail,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::FirstClass => "First Class Honours",
            Classification::SecondClassUpper => "Second Class Honours (Upper Division)",
            Classification::SecondClassLower => "Second Class Honours (Lower Division)",
            Classification::ThirdClass => "Third Class Honours",
            Classification::Pass => "Pass",
            Classification::Fail => "Fail",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of one calculation pass over a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationResult {
    pub current_average: f64,
    pub cumulative_average: Option<f64>,
    /// Classification of the cumulative average when present, otherwise of
    /// the current average.
    pub classification: Classification,
    pub course_count: usize,
    pub semester_count: usize,
    pub current: Totals,
    pub combined: Option<Totals>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterSummary {
    pub letter: &'static str,
    pub count: usize,
    pub units: u64,
}
