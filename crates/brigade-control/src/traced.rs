//! A controller decorator that logs every notification through `tracing`.

use brigade_core::{PebbleId, Rational};
use brigade_robot::{ControllerFactory, Pebble, RobotBody, RobotController, RobotHandle, RobotResult};
use tracing::debug;

/// Wraps another controller, forwards every capability to it unchanged, and
/// emits one `debug!` record per notification.
///
/// Collision records are written before the inner controller reacts, so the
/// logged state is the state that caused the reaction.
pub struct TracedController {
    inner: Box<dyn RobotController>,
}

impl TracedController {
    pub fn new(inner: Box<dyn RobotController>) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> Box<dyn RobotController> {
        self.inner
    }
}

impl RobotController for TracedController {
    fn speed(&self, robot: &RobotBody) -> Rational {
        self.inner.speed(robot)
    }

    fn begin_event(&mut self, robot: &RobotBody) {
        self.inner.begin_event(robot);
    }

    fn end_event(&mut self, robot: &RobotBody) {
        self.inner.end_event(robot);
    }

    fn on_collision_with_robot(
        &mut self,
        robot:       &mut RobotHandle<'_>,
        own_speed:   &Rational,
        other:       &RobotBody,
        other_speed: &Rational,
    ) -> RobotResult<()> {
        debug!(
            robot = %robot.robot().id(),
            other = %other.id(),
            position = %robot.robot().position(),
            %own_speed,
            %other_speed,
            "robot collision"
        );
        self.inner.on_collision_with_robot(robot, own_speed, other, other_speed)
    }

    fn on_collision_with_pebble(
        &mut self,
        robot:  &mut RobotHandle<'_>,
        pebble: PebbleId,
    ) -> RobotResult<()> {
        debug!(
            robot = %robot.robot().id(),
            %pebble,
            position = %robot.robot().position(),
            "pebble collision"
        );
        self.inner.on_collision_with_pebble(robot, pebble)
    }

    fn on_collision_with_wall(&mut self, robot: &mut RobotHandle<'_>) -> RobotResult<()> {
        debug!(
            robot = %robot.robot().id(),
            position = %robot.robot().position(),
            "wall collision"
        );
        self.inner.on_collision_with_wall(robot)
    }

    fn on_take(&mut self, robot: &RobotBody, pebble: &Pebble) {
        debug!(robot = %robot.id(), pebble = %pebble.id(), "took pebble");
        self.inner.on_take(robot, pebble);
    }

    fn on_drop(&mut self, robot: &RobotBody, pebble: &Pebble) {
        debug!(robot = %robot.id(), pebble = %pebble.id(), "dropped pebble");
        self.inner.on_drop(robot, pebble);
    }
}

/// Wraps every controller produced by `F` in a [`TracedController`].
#[derive(Debug, Clone, Default)]
pub struct TracedFactory<F> {
    inner: F,
}

impl<F: ControllerFactory> TracedFactory<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: ControllerFactory> ControllerFactory for TracedFactory<F> {
    fn create(&self) -> Box<dyn RobotController> {
        Box::new(TracedController::new(self.inner.create()))
    }
}
