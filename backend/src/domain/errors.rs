//! Typed failures raised at the domain boundary.
//!
//! Everything here is a local validation failure: none of these are
//! transient and none are retried. Storage unavailability is the one
//! collaborator failure the domain passes through unchanged, via the
//! transparent `Storage` variant.

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid date range: {end} is before {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("date range of {days} days exceeds the maximum of {max}")]
    RangeTooLarge { days: i64, max: i64 },

    #[error("unrecognized reporting period '{0}' (expected 'week' or 'month')")]
    InvalidPeriod(String),

    #[error("behavior {0} is archived")]
    InactiveBehavior(String),

    #[error("an active behavior named '{0}' already exists")]
    DuplicateName(String),

    #[error("behavior {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
