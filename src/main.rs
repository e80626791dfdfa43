use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use gradepoint::config::{self, Config};
use gradepoint::grading::{classify, format_average, grade_point_to_letter, score_to_grade_point};
use gradepoint::session::CalculationSession;
use gradepoint::{import, input, report};

#[derive(Parser)]
#[command(name = "gradepoint")]
#[command(about = "GPA and CGPA calculator for the five-point grading scale", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides GRADEPOINT_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SessionArgs {
    /// Course as NAME:UNIT:SCORE or UNIT:SCORE (repeatable)
    #[arg(long = "course")]
    courses: Vec<String>,
    /// CSV file with name,unit,score columns
    #[arg(long)]
    courses_csv: Option<PathBuf>,
    /// Previous semester as TOTAL_GRADE_POINTS:TOTAL_UNITS (repeatable)
    #[arg(long = "semester")]
    semesters: Vec<String>,
    /// CSV file with total_grade_points,total_units columns
    #[arg(long)]
    semesters_csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grade point and letter for a score
    Grade {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Show the classification for an average
    Classify {
        #[arg(allow_negative_numbers = true)]
        average: f64,
    },
    /// Compute GPA and CGPA
    Compute {
        #[command(flatten)]
        session: SessionArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn build_session(args: &SessionArgs) -> anyhow::Result<CalculationSession> {
    let mut session = CalculationSession::new();

    if let Some(path) = &args.courses_csv {
        import::import_courses(&mut session, path)?;
    }
    for raw in &args.courses {
        let course = input::parse_course_arg(raw)?;
        session
            .add_course_input(&course)
            .with_context(|| format!("course '{raw}' rejected"))?;
    }

    if let Some(path) = &args.semesters_csv {
        import::import_semesters(&mut session, path)?;
    }
    for raw in &args.semesters {
        let semester = input::parse_semester_arg(raw)?;
        session
            .add_semester_input(&semester)
            .with_context(|| format!("semester '{raw}' rejected"))?;
    }

    info!(
        courses = session.courses().len(),
        semesters = session.semesters().len(),
        "session ready"
    );
    Ok(session)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    config::init_logging(cli.verbose);
    let config = Config::load();

    match cli.command {
        Commands::Grade { score } => {
            let grade_point = score_to_grade_point(score);
            println!(
                "Score {} earns grade point {} ({}).",
                score,
                grade_point,
                grade_point_to_letter(grade_point)
            );
        }
        Commands::Classify { average } => {
            println!("{}: {}", format_average(average), classify(average));
        }
        Commands::Compute { session, json } => {
            let session = build_session(&session)?;
            let result = session.result();

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            if session.courses().is_empty() {
                println!("No courses entered.");
            } else {
                println!("Courses:");
                for course in session.courses() {
                    println!(
                        "- {} ({} units) score {} -> {} ({})",
                        course.name,
                        course.unit,
                        course.score,
                        course.grade_point,
                        grade_point_to_letter(course.grade_point)
                    );
                }
            }
            println!(
                "GPA {} over {} units",
                format_average(result.current_average),
                result.current.units
            );
            if let Some(cumulative) = result.cumulative_average {
                println!(
                    "CGPA {} across {} previous semesters",
                    format_average(cumulative),
                    result.semester_count
                );
            }
            println!("Classification: {}", result.classification);
        }
        Commands::Report {
            session,
            title,
            out,
        } => {
            let session = build_session(&session)?;
            let title = title.or(config.report_title);
            let out = out.unwrap_or(config.report_out);
            let report = report::build_report(title.as_deref(), Utc::now().date_naive(), &session);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
