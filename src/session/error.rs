//! Error types for submitted actions.

use thiserror::Error;

/// Top-level error returned by [`Session::submit`](super::Session::submit).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("shift rejected: {0}")]
    Shift(#[from] ShiftFormError),
}

/// A shift form that must not reach the session.
#[derive(Debug, Error, PartialEq)]
pub enum ShiftFormError {
    #[error("hours must be a positive number, got {0}")]
    InvalidHours(f64),

    #[error("work location is empty")]
    MissingLocation,

    #[error("{requested}h would exceed the visa work limit, only {remaining}h left this week")]
    ExceedsVisaLimit { requested: f64, remaining: f64 },
}
