use thiserror::Error;

use crate::domain::{ParseCentsError, TotalOverflow};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid amount '{input}': {source}")]
    InvalidAmount {
        input: String,
        source: ParseCentsError,
    },

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("Cannot summarize spending: {0}")]
    TotalOverflow(#[from] TotalOverflow),
}
