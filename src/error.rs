use thiserror::Error;

/// Rejection of a course or semester before it reaches the session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing fields: {0}")]
    MissingFields(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl ValidationError {
    pub fn missing(detail: impl Into<String>) -> Self {
        ValidationError::MissingFields(detail.into())
    }

    pub fn range(detail: impl Into<String>) -> Self {
        ValidationError::InvalidRange(detail.into())
    }
}
