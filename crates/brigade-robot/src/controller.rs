//! The `RobotController` trait — the main extension point for user code.

use brigade_core::{PebbleId, Rational};

use crate::{Pebble, RobotBody, RobotHandle, RobotResult};

/// Pluggable per-robot decision policy.
///
/// One controller instance is bound to exactly one robot for the robot's
/// lifetime, so a controller may keep per-robot state (for example a latch
/// that limits it to one direction change per event).
///
/// # Required methods
///
/// Every capability is required.  A strategy has to spell out what it does
/// on each kind of event, even if that is nothing.
///
/// # Event round
///
/// For every event the engine calls, on every robot:
///
/// 1. `begin_event`
/// 2. `on_collision_with_pebble` for each free pebble at the robot's position
/// 3. `on_collision_with_wall` if the robot sits on `0` or `1`
/// 4. `on_collision_with_robot` for each neighbour at the same position
/// 5. `end_event`
///
/// `on_take`/`on_drop` fire after each pickup/release, including those made
/// through the [`RobotHandle`] inside a collision hook.
///
/// # Example
///
/// ```rust,ignore
/// struct Bouncer;
///
/// impl RobotController for Bouncer {
///     fn speed(&self, robot: &RobotBody) -> Rational { robot.base_speed().clone() }
///     fn begin_event(&mut self, _: &RobotBody) {}
///     fn end_event(&mut self, _: &RobotBody) {}
///     fn on_collision_with_robot(&mut self, robot: &mut RobotHandle<'_>, _: &Rational,
///                                _: &RobotBody, _: &Rational) -> RobotResult<()> {
///         robot.invert_direction();
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait RobotController {
    /// Effective signed speed of `robot` right now.
    fn speed(&self, robot: &RobotBody) -> Rational;

    /// Start of an event round, before any collision notification.
    fn begin_event(&mut self, robot: &RobotBody);

    /// End of an event round, after all collision notifications.
    fn end_event(&mut self, robot: &RobotBody);

    /// `robot` and `other` are at the same position.  Both speeds are the
    /// effective speeds from before this round's reactions.
    fn on_collision_with_robot(
        &mut self,
        robot:       &mut RobotHandle<'_>,
        own_speed:   &Rational,
        other:       &RobotBody,
        other_speed: &Rational,
    ) -> RobotResult<()>;

    /// `robot` reached the free pebble `pebble`.
    fn on_collision_with_pebble(
        &mut self,
        robot:  &mut RobotHandle<'_>,
        pebble: PebbleId,
    ) -> RobotResult<()>;

    /// `robot` sits on a wall.
    fn on_collision_with_wall(&mut self, robot: &mut RobotHandle<'_>) -> RobotResult<()>;

    /// `robot` just picked up `pebble`.
    fn on_take(&mut self, robot: &RobotBody, pebble: &Pebble);

    /// `robot` just released `pebble`.
    fn on_drop(&mut self, robot: &RobotBody, pebble: &Pebble);
}

/// Creates one fresh controller per robot.
///
/// Any `Fn() -> Box<dyn RobotController>` closure is a factory.
pub trait ControllerFactory {
    fn create(&self) -> Box<dyn RobotController>;
}

impl<F> ControllerFactory for F
where
    F: Fn() -> Box<dyn RobotController>,
{
    fn create(&self) -> Box<dyn RobotController> {
        self()
    }
}
