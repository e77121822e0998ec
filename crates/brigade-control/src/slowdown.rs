//! The reference bucket-brigade policy: robots slow down while carrying.

use brigade_core::{IntoExact, PebbleId, Rational};
use brigade_robot::{ControllerFactory, Pebble, RobotBody, RobotController, RobotHandle, RobotResult};
use num_traits::{One, Signed};

use crate::{ControlError, ControlResult};

/// Carrying-dependent slowdown with factor ε.
///
/// | Event        | Reaction                                                   |
/// |--------------|------------------------------------------------------------|
/// | pebble       | pick it up                                                 |
/// | wall         | turn around                                                |
/// | robot        | turn around and drop everything if the two speeds differ in sign, or if ours is the larger magnitude |
///
/// A robot turns at most once per event, however many collisions it is part
/// of.  While it carries at least one pebble its speed is `ε · base_speed`.
#[derive(Debug, Clone)]
pub struct PebbleSlowdownController {
    epsilon:           Rational,
    turned_this_event: bool,
}

impl PebbleSlowdownController {
    pub fn new(epsilon: Rational) -> Self {
        Self { epsilon, turned_this_event: false }
    }

    pub fn epsilon(&self) -> &Rational {
        &self.epsilon
    }

    fn turn(&mut self, robot: &mut RobotHandle<'_>) {
        if !self.turned_this_event {
            robot.invert_direction();
            self.turned_this_event = true;
        }
    }
}

/// Zero counts as moving right.
fn direction(speed: &Rational) -> i8 {
    if speed.is_negative() { -1 } else { 1 }
}

impl RobotController for PebbleSlowdownController {
    fn speed(&self, robot: &RobotBody) -> Rational {
        if robot.is_carrying() {
            robot.base_speed() * &self.epsilon
        } else {
            robot.base_speed().clone()
        }
    }

    fn begin_event(&mut self, _robot: &RobotBody) {
        self.turned_this_event = false;
    }

    fn end_event(&mut self, _robot: &RobotBody) {}

    fn on_collision_with_robot(
        &mut self,
        robot:        &mut RobotHandle<'_>,
        own_speed:    &Rational,
        _other:       &RobotBody,
        other_speed:  &Rational,
    ) -> RobotResult<()> {
        let opposed = direction(own_speed) != direction(other_speed);
        if opposed || own_speed.abs() > other_speed.abs() {
            self.turn(robot);
            robot.drop_all()?;
        }
        Ok(())
    }

    fn on_collision_with_pebble(
        &mut self,
        robot:  &mut RobotHandle<'_>,
        pebble: PebbleId,
    ) -> RobotResult<()> {
        robot.take_pebble(pebble)
    }

    fn on_collision_with_wall(&mut self, robot: &mut RobotHandle<'_>) -> RobotResult<()> {
        self.turn(robot);
        Ok(())
    }

    fn on_take(&mut self, _robot: &RobotBody, _pebble: &Pebble) {}

    fn on_drop(&mut self, _robot: &RobotBody, _pebble: &Pebble) {}
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Builds a [`PebbleSlowdownController`] with a shared ε for every robot.
#[derive(Debug, Clone)]
pub struct PebbleSlowdownFactory {
    epsilon: Rational,
}

impl PebbleSlowdownFactory {
    /// Fails unless `epsilon > 0`.
    pub fn new(epsilon: impl IntoExact) -> ControlResult<Self> {
        let epsilon = epsilon.into_exact()?;
        if !epsilon.is_positive() {
            return Err(ControlError::InvalidEpsilon(epsilon));
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> &Rational {
        &self.epsilon
    }
}

impl Default for PebbleSlowdownFactory {
    /// ε = 1: carrying does not slow a robot down.
    fn default() -> Self {
        Self { epsilon: Rational::one() }
    }
}

impl ControllerFactory for PebbleSlowdownFactory {
    fn create(&self) -> Box<dyn RobotController> {
        Box::new(PebbleSlowdownController::new(self.epsilon.clone()))
    }
}
