use crate::models::{Classification, ComputationResult, CourseRecord, SemesterRecord, Totals};

/// Maps a raw percentage score onto the five-point scale.
///
/// Bands are inclusive on their lower bound and the top band is open, so a
/// score above 100 still earns 5. Range checks belong to the caller.
pub fn score_to_grade_point(score: f64) -> u8 {
    if score >= 70.0 {
        5
    } else if score >= 60.0 {
        4
    } else if score >= 50.0 {
        3
    } else if score >= 45.0 {
        2
    } else if score >= 40.0 {
        1
    } else {
        0
    }
}

pub fn grade_point_to_letter(grade_point: u8) -> &'static str {
    match grade_point {
        5 => "A",
        4 => "B",
        3 => "C",
        2 => "D",
        1 => "E",
        _ => "F",
    }
}

pub fn course_totals(courses: &[CourseRecord]) -> Totals {
    courses.iter().fold(Totals::default(), |acc, course| Totals {
        grade_points: acc.grade_points + f64::from(course.grade_point) * f64::from(course.unit),
        units: acc.units + f64::from(course.unit),
    })
}

pub fn semester_totals(semesters: &[SemesterRecord]) -> Totals {
    semesters.iter().fold(Totals::default(), |acc, semester| Totals {
        grade_points: acc.grade_points + semester.total_grade_points,
        units: acc.units + semester.total_units,
    })
}

/// Unit-weighted average of the session's grade points. An empty list
/// averages to exactly 0.
pub fn compute_current_average(courses: &[CourseRecord]) -> f64 {
    let totals = course_totals(courses);
    if totals.units == 0.0 {
        return 0.0;
    }
    totals.grade_points / totals.units
}

/// Combines the current session with previous semesters. `None` until at
/// least one semester exists, and when the combined units are zero.
pub fn compute_cumulative_average(
    courses: &[CourseRecord],
    semesters: &[SemesterRecord],
) -> Option<f64> {
    combined_totals(courses, semesters).map(|totals| totals.grade_points / totals.units)
}

fn combined_totals(courses: &[CourseRecord], semesters: &[SemesterRecord]) -> Option<Totals> {
    if semesters.is_empty() {
        return None;
    }
    let totals = course_totals(courses).combine(semester_totals(semesters));
    if totals.units == 0.0 {
        return None;
    }
    Some(totals)
}

/// Two-decimal display of an average. Values in `[4.995, 5.0)` show as
/// "4.99" so only a perfect record ever displays "5.00".
pub fn format_average(value: f64) -> String {
    if value == 5.0 {
        "5.00".to_string()
    } else if (4.995..5.0).contains(&value) {
        "4.99".to_string()
    } else {
        to_fixed_2(value)
    }
}

/// `{:.2}` rounds exact ties to even; ties here round away from zero instead.
/// The only binary values sitting exactly on a hundredths tie are odd
/// multiples of 1/8, such as 2.125.
fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    let exact_tie = eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 != 0.0;
    if exact_tie {
        let hundredths = (value.abs() * 100.0).ceil().copysign(value);
        format!("{:.2}", hundredths / 100.0)
    } else {
        format!("{:.2}", value)
    }
}

pub fn classify(average: f64) -> Classification {
    if average >= 4.5 {
        Classification::FirstClass
    } else if average >= 3.5 {
        Classification::SecondClassUpper
    } else if average >= 2.4 {
        Classification::SecondClassLower
    } else if average >= 1.5 {
        Classification::ThirdClass
    } else if average >= 1.0 {
        Classification::Pass
    } else {
        Classification::Fail
    }
}

pub fn compute(courses: &[CourseRecord], semesters: &[SemesterRecord]) -> ComputationResult {
    let current_average = compute_current_average(courses);
    let combined = combined_totals(courses, semesters);
    let cumulative_average = combined.map(|totals| totals.grade_points / totals.units);

    ComputationResult {
        current_average,
        cumulative_average,
        classification: classify(cumulative_average.unwrap_or(current_average)),
        course_count: courses.len(),
        semester_count: semesters.len(),
        current: course_totals(courses),
        combined,
    }
}
