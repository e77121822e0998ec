use brigade_core::{CoreError, PebbleId, Rational, RobotId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobotError {
    #[error("pebble {pebble} is already held by {holder}")]
    AlreadyHeld {
        pebble: PebbleId,
        holder: RobotId,
    },

    #[error("robot {0} carries no pebble")]
    NothingToHold(RobotId),

    #[error("robot {robot} does not carry pebble {pebble}")]
    NotCarried {
        robot:  RobotId,
        pebble: PebbleId,
    },

    #[error("pebble {0} does not exist")]
    UnknownPebble(PebbleId),

    #[error("robot {robot} moved to {position}, outside [0, 1]")]
    OutOfBounds {
        robot:    RobotId,
        position: Rational,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RobotResult<T> = Result<T, RobotError>;
