//! Grade point engine: score to grade point mapping, unit-weighted GPA,
//! cumulative GPA across semesters, display formatting and degree class.

pub mod config;
pub mod error;
pub mod grading;
pub mod import;
pub mod input;
pub mod models;
pub mod report;
pub mod session;

pub use error::ValidationError;
pub use models::{Classification, ComputationResult, CourseRecord, SemesterRecord, Totals};
pub use session::CalculationSession;
