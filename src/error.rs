use thiserror::Error;

/// Failure of a lifecycle or relationship operation.
///
/// Every variant aborts the current unit of work; none is retryable.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Capacity error: {0}")]
    Capacity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::Capacity(_) => "capacity",
            ServiceError::Database(_) => "database",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid {field}: {len} characters (must be between 2 and 512)")]
    NameLength { field: &'static str, len: usize },

    #[error("Invalid age {0}: must be between 5 and 120")]
    AgeOutOfRange(i64),

    #[error("Customer {customer_id} (age {age}) is below the age limit {age_limit} of show {show_id}")]
    AgeBelowLimit {
        customer_id: i64,
        age: i64,
        show_id: i64,
        age_limit: i64,
    },

    #[error("Invalid age_limit {0}: must be between 0 and 25")]
    AgeLimitOutOfRange(i64),

    #[error("Invalid head_count {0}: must be between 0 and 50000")]
    HeadCountOutOfRange(i64),

    #[error("Invalid {field} {value}: must not be negative")]
    Negative { field: &'static str, value: i64 },
}
