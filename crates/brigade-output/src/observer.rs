//! `TrajectoryObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use brigade_core::Rational;
use brigade_robot::{Pebble, Robot};
use brigade_sim::{SimObserver, SimView};

use crate::row::{PebbleRow, RobotRow, StepRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a creation row for every robot and pebble,
/// then after every step one row per robot, one per pebble, and a step
/// summary.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error] and flush with [`finish`][Self::finish].
pub struct TrajectoryObserver<W: OutputWriter> {
    writer:     W,
    steps:      u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrajectoryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            steps:      0,
            last_error: None,
        }
    }

    /// Steps recorded so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Report any stored error, then flush the writer.
    pub fn finish(&mut self) -> OutputResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TrajectoryObserver<W> {
    fn on_robot_created(&mut self, robot: &Robot, time: &Rational) {
        let result = self.writer.write_robots(&[RobotRow::new(0, time, robot)]);
        self.store_err(result);
    }

    fn on_pebble_created(&mut self, pebble: &Pebble, time: &Rational) {
        let result = self.writer.write_pebbles(&[PebbleRow::new(0, time, pebble)]);
        self.store_err(result);
    }

    fn on_step(&mut self, view: &SimView<'_>) {
        self.steps += 1;
        let step = self.steps;

        let robots: Vec<RobotRow> = view.robots.iter().map(|r| RobotRow::new(step, view.time, r)).collect();
        let result = self.writer.write_robots(&robots);
        self.store_err(result);

        if !view.pebbles.is_empty() {
            let pebbles: Vec<PebbleRow> = view.pebbles.iter().map(|p| PebbleRow::new(step, view.time, p)).collect();
            let result = self.writer.write_pebbles(&pebbles);
            self.store_err(result);
        }

        let result = self.writer.write_step(&StepRow::new(step, view.time, view.elapsed, view.resolved));
        self.store_err(result);
    }
}
