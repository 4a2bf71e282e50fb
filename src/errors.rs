//! Unified application error type.
//! All modules (models, core, config, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Submission flow
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("{0}")]
    Backend(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Another save or submit is already in progress")]
    Busy,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid lunch break: {0} (allowed: 0, 15, 30, 45, 60)")]
    InvalidLunch(String),

    #[error("Invalid total hours: {0}")]
    InvalidHours(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True when the failed call left local state untouched and may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Backend(_) | AppError::Transport(_) | AppError::Busy
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
