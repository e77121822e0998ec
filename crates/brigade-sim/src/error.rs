use brigade_core::{CoreError, RobotId};
use brigade_robot::RobotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("no controller supplied and no default controller factory configured")]
    NoControllerFactory,

    #[error("no pending event: nothing on the line will ever meet anything else")]
    NoPendingEvent,

    #[error("{0} does not exist in this simulator")]
    UnknownRobot(RobotId),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error(transparent)]
    Robot(#[from] RobotError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
