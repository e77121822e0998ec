//! A controller that ignores everything but walls.

use brigade_core::{PebbleId, Rational};
use brigade_robot::{ControllerFactory, Pebble, RobotBody, RobotController, RobotHandle, RobotResult};

/// Robots that pass through each other and leave pebbles where they are.
///
/// Walls still turn them around, so they stay on the interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveController;

impl RobotController for PassiveController {
    fn speed(&self, robot: &RobotBody) -> Rational {
        robot.base_speed().clone()
    }

    fn begin_event(&mut self, _robot: &RobotBody) {}

    fn end_event(&mut self, _robot: &RobotBody) {}

    fn on_collision_with_robot(
        &mut self,
        _robot:       &mut RobotHandle<'_>,
        _own_speed:   &Rational,
        _other:       &RobotBody,
        _other_speed: &Rational,
    ) -> RobotResult<()> {
        Ok(())
    }

    fn on_collision_with_pebble(
        &mut self,
        _robot:  &mut RobotHandle<'_>,
        _pebble: PebbleId,
    ) -> RobotResult<()> {
        Ok(())
    }

    fn on_collision_with_wall(&mut self, robot: &mut RobotHandle<'_>) -> RobotResult<()> {
        robot.invert_direction();
        Ok(())
    }

    fn on_take(&mut self, _robot: &RobotBody, _pebble: &Pebble) {}

    fn on_drop(&mut self, _robot: &RobotBody, _pebble: &Pebble) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveFactory;

impl ControllerFactory for PassiveFactory {
    fn create(&self) -> Box<dyn RobotController> {
        Box::new(PassiveController)
    }
}
