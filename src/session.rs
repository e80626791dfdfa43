use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::grading;
use crate::input::{self, CourseInput, SemesterInput};
use crate::models::{ComputationResult, CourseRecord, SemesterRecord};

/// Courses and previous semesters entered during one calculation.
///
/// The session owns both lists; every `compute` style method is a read-only
/// projection over them.
#[derive(Debug, Clone, Default)]
pub struct CalculationSession {
    courses: Vec<CourseRecord>,
    semesters: Vec<SemesterRecord>,
}

impl CalculationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn semesters(&self) -> &[SemesterRecord] {
        &self.semesters
    }

    pub fn add_course(
        &mut self,
        name: Option<&str>,
        unit: Option<i64>,
        score: Option<f64>,
    ) -> Result<&CourseRecord, ValidationError> {
        let (unit, score) = match (unit, score.filter(|s| s.is_finite())) {
            (Some(unit), Some(score)) => (unit, score),
            _ => {
                warn!("rejected course: unit and score are required");
                return Err(ValidationError::missing("unit and score are required"));
            }
        };

        let unit = match u32::try_from(unit) {
            Ok(unit) if unit > 0 => unit,
            _ => {
                warn!(unit, "rejected course: unit out of range");
                return Err(ValidationError::range(format!(
                    "unit must be a positive whole number, got {unit}"
                )));
            }
        };
        if !(0.0..=100.0).contains(&score) {
            warn!(score, "rejected course: score out of range");
            return Err(ValidationError::range(format!(
                "score must be between 0 and 100, got {score}"
            )));
        }

        let position = self.courses.len() + 1;
        let name = input::parse_name(name).unwrap_or_else(|| format!("Course {position}"));
        let record = CourseRecord {
            id: Uuid::new_v4(),
            name,
            unit,
            score,
            grade_point: grading::score_to_grade_point(score),
        };
        debug!(
            id = %record.id,
            name = %record.name,
            unit,
            score,
            grade_point = record.grade_point,
            "course added"
        );

        self.courses.push(record);
        Ok(&self.courses[position - 1])
    }

    /// Adds a course from textual fields; blank or unparseable numbers are
    /// treated as missing.
    pub fn add_course_raw(
        &mut self,
        name: Option<&str>,
        unit: &str,
        score: &str,
    ) -> Result<&CourseRecord, ValidationError> {
        self.add_course(name, input::parse_unit(unit), input::parse_number(score))
    }

    pub fn add_course_input(
        &mut self,
        course: &CourseInput,
    ) -> Result<&CourseRecord, ValidationError> {
        self.add_course(course.name.as_deref(), course.unit, course.score)
    }

    /// Returns whether a course was removed. Unknown ids are ignored.
    pub fn remove_course(&mut self, id: Uuid) -> bool {
        let before = self.courses.len();
        self.courses.retain(|course| course.id != id);
        let removed = self.courses.len() != before;
        debug!(%id, removed, "remove course");
        removed
    }

    pub fn clear_courses(&mut self) {
        debug!(count = self.courses.len(), "clearing courses");
        self.courses.clear();
    }

    pub fn add_semester(
        &mut self,
        total_grade_points: Option<f64>,
        total_units: Option<f64>,
    ) -> Result<&SemesterRecord, ValidationError> {
        let (total_grade_points, total_units) = match (
            total_grade_points.filter(|v| v.is_finite()),
            total_units.filter(|v| v.is_finite()),
        ) {
            (Some(points), Some(units)) => (points, units),
            _ => {
                warn!("rejected semester: grade points and units are required");
                return Err(ValidationError::missing(
                    "total grade points and total units are required",
                ));
            }
        };

        if total_grade_points < 0.0 {
            warn!(total_grade_points, "rejected semester: negative grade points");
            return Err(ValidationError::range(format!(
                "total grade points must not be negative, got {total_grade_points}"
            )));
        }
        if total_units <= 0.0 {
            warn!(total_units, "rejected semester: units out of range");
            return Err(ValidationError::range(format!(
                "total units must be greater than 0, got {total_units}"
            )));
        }

        let record = SemesterRecord {
            id: Uuid::new_v4(),
            total_grade_points,
            total_units,
        };
        debug!(id = %record.id, total_grade_points, total_units, "semester added");

        self.semesters.push(record);
        Ok(&self.semesters[self.semesters.len() - 1])
    }

    pub fn add_semester_raw(
        &mut self,
        total_grade_points: &str,
        total_units: &str,
    ) -> Result<&SemesterRecord, ValidationError> {
        self.add_semester(
            input::parse_number(total_grade_points),
            input::parse_number(total_units),
        )
    }

    pub fn add_semester_input(
        &mut self,
        semester: &SemesterInput,
    ) -> Result<&SemesterRecord, ValidationError> {
        self.add_semester(semester.total_grade_points, semester.total_units)
    }

    pub fn remove_semester(&mut self, id: Uuid) -> bool {
        let before = self.semesters.len();
        self.semesters.retain(|semester| semester.id != id);
        let removed = self.semesters.len() != before;
        debug!(%id, removed, "remove semester");
        removed
    }

    pub fn clear_semesters(&mut self) {
        debug!(count = self.semesters.len(), "clearing semesters");
        self.semesters.clear();
    }

    pub fn current_average(&self) -> f64 {
        grading::compute_current_average(&self.courses)
    }

    pub fn cumulative_average(&self) -> Option<f64> {
        grading::compute_cumulative_average(&self.courses, &self.semesters)
    }

    pub fn result(&self) -> ComputationResult {
        grading::compute(&self.courses, &self.semesters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;

    #[test]
    fn rejects_zero_unit_and_high_score() {
        let mut session = CalculationSession::new();
        assert!(matches!(
            session.add_course(None, Some(0), Some(50.0)),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(matches!(
            session.add_course(None, Some(3), Some(101.0)),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(session.courses().is_empty());
    }

    #[test]
    fn rejects_negative_and_oversized_units() {
        let mut session = CalculationSession::new();
        assert!(matches!(
            session.add_course(None, Some(-2), Some(50.0)),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(matches!(
            session.add_course(None, Some(5_000_000_000), Some(50.0)),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(session.courses().is_empty());
    }

    #[test]
    fn non_finite_scores_count_as_missing() {
        let mut session = CalculationSession::new();
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                session.add_course(Some("Math"), Some(3), Some(score)),
                Err(ValidationError::MissingFields(_))
            ));
        }
        assert!(session.courses().is_empty());
    }

    #[test]
    fn non_finite_semester_fields_count_as_missing() {
        let mut session = CalculationSession::new();
        assert!(matches!(
            session.add_semester(Some(f64::NAN), Some(10.0)),
            Err(ValidationError::MissingFields(_))
        ));
        assert!(matches!(
            session.add_semester(Some(30.0), Some(f64::INFINITY)),
            Err(ValidationError::MissingFields(_))
        ));
        assert!(matches!(
            session.add_semester(Some(f64::NEG_INFINITY), Some(-1.0)),
            Err(ValidationError::MissingFields(_))
        ));
        assert!(session.semesters().is_empty());
    }

    #[test]
    fn accepts_minimum_valid_course() {
        let mut session = CalculationSession::new();
        let record = session.add_course(None, Some(1), Some(0.0)).unwrap();
        assert_eq!(record.grade_point, 0);
        assert_eq!(record.name, "Course 1");
    }

    #[test]
    fn missing_fields_checked_before_range() {
        let mut session = CalculationSession::new();
        let err = session.add_course(Some("Math"), None, Some(500.0)).unwrap_err();
        assert!(matches!(err, ValidationError::MissingFields(_)));
        assert!(err.to_string().starts_with("missing fields"));

        let err = session.add_course_raw(None, "", "80").unwrap_err();
        assert!(matches!(err, ValidationError::MissingFields(_)));
    }

    #[test]
    fn default_names_follow_position() {
        let mut session = CalculationSession::new();
        session.add_course(Some("Math"), Some(3), Some(72.0)).unwrap();
        let second = session.add_course(Some("   "), Some(2), Some(55.0)).unwrap();
        assert_eq!(second.name, "Course 2");
    }

    #[test]
    fn removal_is_idempotent() {
        let mut session = CalculationSession::new();
        let id = session.add_course(Some("Math"), Some(3), Some(72.0)).unwrap().id;
        session.add_course(Some("Physics"), Some(2), Some(48.0)).unwrap();

        assert!(session.remove_course(id));
        assert!(!session.remove_course(id));
        assert!(!session.remove_course(Uuid::new_v4()));
        assert_eq!(session.courses().len(), 1);
        assert_eq!(session.courses()[0].name, "Physics");
    }

    #[test]
    fn clear_removes_everything() {
        let mut session = CalculationSession::new();
        session.add_course(None, Some(3), Some(72.0)).unwrap();
        session.add_semester(Some(30.0), Some(10.0)).unwrap();
        session.clear_courses();
        session.clear_semesters();
        assert!(session.courses().is_empty());
        assert!(session.semesters().is_empty());
        assert_eq!(session.current_average(), 0.0);
    }

    #[test]
    fn semester_validation() {
        let mut session = CalculationSession::new();
        assert!(matches!(
            session.add_semester(Some(-1.0), Some(10.0)),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(matches!(
            session.add_semester(Some(10.0), Some(0.0)),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(matches!(
            session.add_semester_raw("abc", "10"),
            Err(ValidationError::MissingFields(_))
        ));
        // no cross-check against the scale maximum
        assert!(session.add_semester(Some(80.0), Some(10.0)).is_ok());
    }

    #[test]
    fn semester_removal_is_idempotent() {
        let mut session = CalculationSession::new();
        let id = session.add_semester(Some(30.0), Some(10.0)).unwrap().id;
        assert!(session.remove_semester(id));
        assert!(!session.remove_semester(id));
        assert_eq!(session.cumulative_average(), None);
    }

    #[test]
    fn end_to_end_session() {
        let mut session = CalculationSession::new();
        session.add_course(Some("Math"), Some(3), Some(72.0)).unwrap();
        session.add_course(Some("Physics"), Some(2), Some(48.0)).unwrap();
        session.add_course(Some("Chem"), Some(4), Some(39.0)).unwrap();

        let points: Vec<u8> = session.courses().iter().map(|c| c.grade_point).collect();
        assert_eq!(points, vec![5, 2, 0]);

        let result = session.result();
        assert_eq!(result.current.grade_points, 19.0);
        assert_eq!(result.current.units, 9.0);
        assert!((result.current_average - 19.0 / 9.0).abs() < 1e-9);
        assert_eq!(result.cumulative_average, None);
        assert_eq!(result.classification, Classification::SecondClassLower);
        assert_eq!(
            result.classification.to_string(),
            "Second Class Honours (Lower Division)"
        );
    }
}
