// Custom error type and result alias for the crate, built on thiserror.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Time must follow hh:mm AM/PM (e.g., 02:30 PM) and date YYYY-MM-DD")]
    InvalidDeadlineFormat,

    #[error("Permission denied: {role} may not {action}")]
    Permission {
        role: &'static str,
        action: &'static str,
    },

    #[error("Task {0} not found")]
    NotFound(i64),

    // The #[from] attribute converts the underlying error via the From trait.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
