use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Stat submission contains no counters")]
    EmptySubmission,

    #[error("Counter {field} would become negative ({value})")]
    NegativeCounter { field: &'static str, value: i32 },

    #[error("Counter {field} is out of range")]
    CounterOverflow { field: &'static str },
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        AppError::Validation(err.to_string())
    }
}
