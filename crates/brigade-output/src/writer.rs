//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, PebbleRow, RobotRow, StepRow};

/// Trait implemented by trajectory backends.
///
/// Errors never reach the simulator: the observer keeps the first one for
/// [`TrajectoryObserver::take_error`][crate::TrajectoryObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of robot rows.
    fn write_robots(&mut self, rows: &[RobotRow]) -> OutputResult<()>;

    /// Write a batch of pebble rows.
    fn write_pebbles(&mut self, rows: &[PebbleRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
