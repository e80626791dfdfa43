use std::fmt::Write;

use chrono::NaiveDate;

use crate::grading::{format_average, grade_point_to_letter};
use crate::models::{CourseRecord, LetterSummary};
use crate::session::CalculationSession;

const LETTERS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

pub fn summarize_by_letter(courses: &[CourseRecord]) -> Vec<LetterSummary> {
    LETTERS
        .into_iter()
        .filter_map(|letter| {
            let matching = courses
                .iter()
                .filter(|course| grade_point_to_letter(course.grade_point) == letter);
            let (count, units) = matching.fold((0usize, 0u64), |(count, units), course| {
                (count + 1, units + u64::from(course.unit))
            });
            (count > 0).then_some(LetterSummary {
                letter,
                count,
                units,
            })
        })
        .collect()
}

pub fn build_report(
    title: Option<&str>,
    generated_on: NaiveDate,
    session: &CalculationSession,
) -> String {
    let result = session.result();
    let courses = session.courses();
    let summaries = summarize_by_letter(courses);

    let mut output = String::new();

    let _ = writeln!(output, "# {}", title.unwrap_or("Grade Point Report"));
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Courses");

    if courses.is_empty() {
        let _ = writeln!(output, "No courses entered.");
    } else {
        let _ = writeln!(output, "| Course | Unit | Score | Grade Point | Grade |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for course in courses {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                course.name,
                course.unit,
                course.score,
                course.grade_point,
                grade_point_to_letter(course.grade_point)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Distribution");

    if summaries.is_empty() {
        let _ = writeln!(output, "No grades recorded.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} courses ({} units)",
                summary.letter, summary.count, summary.units
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Previous Semesters");

    if session.semesters().is_empty() {
        let _ = writeln!(output, "No previous semesters entered.");
    } else {
        for (index, semester) in session.semesters().iter().enumerate() {
            let _ = writeln!(
                output,
                "- Semester {}: {} grade points over {} units ({})",
                index + 1,
                semester.total_grade_points,
                semester.total_units,
                format_average(semester.total_grade_points / semester.total_units)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Total unit grade points: {}", result.current.grade_points);
    let _ = writeln!(output, "- Total units: {}", result.current.units);
    let _ = writeln!(output, "- GPA: {}", format_average(result.current_average));
    let _ = writeln!(
        output,
        "- CGPA: {}",
        result
            .cumulative_average
            .map(format_average)
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(output, "- Classification: {}", result.classification);

    output
}
