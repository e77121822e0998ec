//! Plain data row types written by output backends.
//!
//! Exact values are kept as strings (`"5/12"`); the `_f64` twins exist only
//! for plotting.

use brigade_core::{Rational, to_f64};
use brigade_robot::{Pebble, Robot};

/// One robot's state after a step (`step == 0` is the creation row).
#[derive(Debug, Clone, PartialEq)]
pub struct RobotRow {
    pub step:         u64,
    pub time:         String,
    pub time_f64:     f64,
    pub robot_id:     u32,
    pub name:         String,
    pub position:     String,
    pub position_f64: f64,
    /// Effective speed.
    pub speed:        String,
    pub base_speed:   String,
    pub carrying:     u32,
}

/// One pebble's state after a step (`step == 0` is the creation row).
#[derive(Debug, Clone, PartialEq)]
pub struct PebbleRow {
    pub step:         u64,
    pub time:         String,
    pub time_f64:     f64,
    pub pebble_id:    u32,
    pub name:         String,
    pub position:     String,
    pub position_f64: f64,
    pub holder:       Option<u32>,
}

/// Summary of one simulator step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub step:        u64,
    pub time:        String,
    pub time_f64:    f64,
    pub elapsed:     String,
    pub elapsed_f64: f64,
    /// `false` for a capped step that stopped short of an event.
    pub resolved:    bool,
}

impl RobotRow {
    pub fn new(step: u64, time: &Rational, robot: &Robot) -> Self {
        Self {
            step,
            time:         time.to_string(),
            time_f64:     to_f64(time),
            robot_id:     robot.id().0,
            name:         robot.name().to_owned(),
            position:     robot.position().to_string(),
            position_f64: to_f64(robot.position()),
            speed:        robot.effective_speed().to_string(),
            base_speed:   robot.base_speed().to_string(),
            carrying:     robot.carried().len() as u32,
        }
    }
}

impl PebbleRow {
    pub fn new(step: u64, time: &Rational, pebble: &Pebble) -> Self {
        Self {
            step,
            time:         time.to_string(),
            time_f64:     to_f64(time),
            pebble_id:    pebble.id().0,
            name:         pebble.name().to_owned(),
            position:     pebble.position().to_string(),
            position_f64: to_f64(pebble.position()),
            holder:       pebble.holder().map(|r| r.0),
        }
    }
}

impl StepRow {
    pub fn new(step: u64, time: &Rational, elapsed: &Rational, resolved: bool) -> Self {
        Self {
            step,
            time:        time.to_string(),
            time_f64:    to_f64(time),
            elapsed:     elapsed.to_string(),
            elapsed_f64: to_f64(elapsed),
            resolved,
        }
    }
}
