use std::env;
use std::path::PathBuf;

use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "GRADEPOINT_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

pub struct Config {
    pub report_title: Option<String>,
    pub report_out: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            report_title: var("GRADEPOINT_REPORT_TITLE").filter(|title| !title.trim().is_empty()),
            report_out: var("GRADEPOINT_REPORT_OUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    debug!("GRADEPOINT_REPORT_OUT not set, using default: report.md");
                    PathBuf::from("report.md")
                }),
        }
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) => Some(value),
        Err(env::VarError::NotPresent) => None,
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            None
        }
    }
}

/// Logs go to stderr so command output stays pipeable. The filter comes from
/// `GRADEPOINT_LOG` and falls back to `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gradepoint=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_are_absent() {
        let key = format!("GRADEPOINT_TEST_{}", uuid::Uuid::new_v4().simple());
        assert_eq!(var(&key), None);
    }

    #[test]
    fn set_variables_are_read() {
        let key = format!("GRADEPOINT_TEST_{}", uuid::Uuid::new_v4().simple());
        env::set_var(&key, "Final Year");
        assert_eq!(var(&key).as_deref(), Some("Final Year"));
        env::remove_var(&key);
    }
}
