use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::session::CalculationSession;

#[derive(Debug, Deserialize)]
struct CourseRow {
    name: Option<String>,
    unit: Option<String>,
    score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SemesterRow {
    total_grade_points: Option<String>,
    total_units: Option<String>,
}

/// Loads `name,unit,score` rows into the session. Stops at the first row
/// that fails validation.
pub fn import_courses(session: &mut CalculationSession, csv_path: &Path) -> anyhow::Result<usize> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let inserted = import_courses_from_reader(session, file)?;
    info!(inserted, path = %csv_path.display(), "imported courses");
    Ok(inserted)
}

pub fn import_courses_from_reader<R: Read>(
    session: &mut CalculationSession,
    source: R,
) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_reader(source);
    let mut inserted = 0usize;

    for (index, result) in reader.deserialize::<CourseRow>().enumerate() {
        let row_number = index + 1;
        let row = result.with_context(|| format!("malformed course row {row_number}"))?;
        session
            .add_course_raw(
                row.name.as_deref(),
                row.unit.as_deref().unwrap_or_default(),
                row.score.as_deref().unwrap_or_default(),
            )
            .with_context(|| format!("course row {row_number} rejected"))?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Loads `total_grade_points,total_units` rows into the session.
pub fn import_semesters(
    session: &mut CalculationSession,
    csv_path: &Path,
) -> anyhow::Result<usize> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let inserted = import_semesters_from_reader(session, file)?;
    info!(inserted, path = %csv_path.display(), "imported semesters");
    Ok(inserted)
}

pub fn import_semesters_from_reader<R: Read>(
    session: &mut CalculationSession,
    source: R,
) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_reader(source);
    let mut inserted = 0usize;

    for (index, result) in reader.deserialize::<SemesterRow>().enumerate() {
        let row_number = index + 1;
        let row = result.with_context(|| format!("malformed semester row {row_number}"))?;
        session
            .add_semester_raw(
                row.total_grade_points.as_deref().unwrap_or_default(),
                row.total_units.as_deref().unwrap_or_default(),
            )
            .with_context(|| format!("semester row {row_number} rejected"))?;
        inserted += 1;
    }

    Ok(inserted)
}
