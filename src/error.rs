//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Error originating from database operations (`sqlx`).
    #[error("Database Error: {0}")]
    Db(Arc<sqlx::Error>),

    /// Missing or malformed connection settings.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// The operator backed out of a prompt with Esc.
    #[error("Prompt cancelled")]
    Cancelled,

    /// A handler asked the answer bag for a name it does not hold, or for the wrong shape.
    #[error("Missing answer: {0}")]
    MissingAnswer(String),

    /// Error related to progress bar style templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

impl AppError {
    /// Whether the menu loop must stop instead of reporting the error and re-prompting.
    ///
    /// Only failures that leave the store connection or the terminal unusable are fatal.
    /// Rejected statements, aborted prompts and bad answers are reported and the operator
    /// returns to the main menu.
    pub fn is_fatal(&self) -> bool {
        match self {
            AppError::Db(e) => matches!(
                e.as_ref(),
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::WorkerCrashed
            ),
            AppError::Io(_) | AppError::Dialoguer(_) => true,
            AppError::Config(_) | AppError::Template(_) => true,
            AppError::Cancelled | AppError::MissingAnswer(_) => false,
        }
    }
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Db(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}
