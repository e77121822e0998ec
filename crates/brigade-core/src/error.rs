//! Error type shared by the numeric and clock primitives.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, so a `?` on a core call never needs a manual conversion.

use thiserror::Error;

use crate::Rational;

/// The error type for `brigade-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("time delta must be positive, got {0}")]
    InvalidTimeDelta(Rational),

    #[error("position {0} is outside the unit interval [0, 1]")]
    PositionOutOfRange(Rational),

    #[error("cannot parse {input:?} as an exact number: {reason}")]
    Parse {
        input:  String,
        reason: &'static str,
    },

    #[error("{0} has no exact rational value")]
    NotFinite(String),
}

/// Shorthand result type for all `brigade-*` core operations.
pub type CoreResult<T> = Result<T, CoreError>;
