use crate::error::ValidationError;

/// Raw course fields as typed by a user, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseInput {
    pub name: Option<String>,
    pub unit: Option<i64>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemesterInput {
    pub total_grade_points: Option<f64>,
    pub total_units: Option<f64>,
}

/// Blank or unparseable text counts as absent.
pub fn parse_unit(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Parses `NAME:UNIT:SCORE` or `UNIT:SCORE`. The name may contain colons.
pub fn parse_course_arg(raw: &str) -> Result<CourseInput, ValidationError> {
    let mut parts = raw.rsplitn(3, ':');
    let score = parts.next();
    let unit = parts.next();
    let name = parts.next();

    match (unit, score) {
        (Some(unit), Some(score)) => Ok(CourseInput {
            name: parse_name(name),
            unit: parse_unit(unit),
            score: parse_number(score),
        }),
        _ => Err(ValidationError::missing(format!(
            "expected NAME:UNIT:SCORE or UNIT:SCORE, got '{raw}'"
        ))),
    }
}

/// Parses `TOTAL_GRADE_POINTS:TOTAL_UNITS`.
pub fn parse_semester_arg(raw: &str) -> Result<SemesterInput, ValidationError> {
    match raw.split_once(':') {
        Some((points, units)) => Ok(SemesterInput {
            total_grade_points: parse_number(points),
            total_units: parse_number(units),
        }),
        None => Err(ValidationError::missing(format!(
            "expected TOTAL_GRADE_POINTS:TOTAL_UNITS, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_arg_with_name() {
        let input = parse_course_arg("Math:3:72").unwrap();
        assert_eq!(input.name.as_deref(), Some("Math"));
        assert_eq!(input.unit, Some(3));
        assert_eq!(input.score, Some(72.0));
    }

    #[test]
    fn course_arg_name_keeps_colons() {
        let input = parse_course_arg("MTH 101: Calculus:4:61.5").unwrap();
        assert_eq!(input.name.as_deref(), Some("MTH 101: Calculus"));
        assert_eq!(input.unit, Some(4));
        assert_eq!(input.score, Some(61.5));
    }

    #[test]
    fn course_arg_without_name() {
        let input = parse_course_arg("2:48").unwrap();
        assert_eq!(input.name, None);
        assert_eq!(input.unit, Some(2));
    }

    #[test]
    fn unparseable_fields_become_absent() {
        let input = parse_course_arg("Chem:three:NaN").unwrap();
        assert_eq!(input.unit, None);
        assert_eq!(input.score, None);
        assert_eq!(parse_unit("2.5"), None);
        assert_eq!(parse_number(" 7.25 "), Some(7.25));
    }

    #[test]
    fn malformed_args_are_rejected() {
        assert!(matches!(
            parse_course_arg("72"),
            Err(ValidationError::MissingFields(_))
        ));
        assert!(matches!(
            parse_semester_arg("30"),
            Err(ValidationError::MissingFields(_))
        ));
    }

    #[test]
    fn semester_arg() {
        let input = parse_semester_arg("30:10").unwrap();
        assert_eq!(input.total_grade_points, Some(30.0));
        assert_eq!(input.total_units, Some(10.0));
    }
}
