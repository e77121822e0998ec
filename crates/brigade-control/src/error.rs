use brigade_core::{CoreError, Rational};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("slowdown factor must be positive, got {0}")]
    InvalidEpsilon(Rational),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ControlResult<T> = Result<T, ControlError>;
