//! Robots — moving points with a bound controller.

use std::fmt;

use brigade_core::{CoreError, CoreResult, PebbleId, Rational, RobotId};
use num_traits::{One, Signed, Zero};
use tracing::{info, warn};

use crate::controller::RobotController;
use crate::handle::{RobotHandle, Transfer};
use crate::{Pebble, RobotError, RobotResult};

// ── BoundaryPolicy ────────────────────────────────────────────────────────────

/// What [`Robot::advance`] does when a move lands outside `[0, 1]`.
///
/// Under exact event timing this never happens; either policy therefore
/// signals an upstream timing bug.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Clamp into `[0, 1]`, emit a `warn!` record, and keep running.
    #[default]
    ClampAndWarn,
    /// Fail the move with [`RobotError::OutOfBounds`].
    Strict,
}

// ── RobotBody ─────────────────────────────────────────────────────────────────

/// The physical state of a robot, separate from its controller so that a
/// controller hook can borrow the controller and the body at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotBody {
    id:         RobotId,
    name:       String,
    position:   Rational,
    base_speed: Rational,
    /// Carried pebbles in pickup order.
    carried:    Vec<PebbleId>,
}

impl RobotBody {
    /// Create a robot body at `position` heading with signed `speed`.
    ///
    /// A speed pointing out of the interval from either wall is inverted.
    /// Unnamed robots are called `robot_<id>`.
    pub fn new(
        id:       RobotId,
        name:     Option<String>,
        position: Rational,
        speed:    Rational,
    ) -> CoreResult<Self> {
        if position.is_negative() || position > Rational::one() {
            return Err(CoreError::PositionOutOfRange(position));
        }

        let points_outward = (position.is_zero() && speed.is_negative())
            || (position.is_one() && speed.is_positive());
        let base_speed = if points_outward {
            info!(robot = %id, %position, %speed, "inverted speed pointing out of the interval");
            -speed
        } else {
            speed
        };

        Ok(Self {
            id,
            name: name.unwrap_or_else(|| format!("robot_{}", id.0)),
            position,
            base_speed,
            carried: Vec::new(),
        })
    }

    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> &Rational {
        &self.position
    }

    /// Signed speed before any controller adjustment.
    #[inline]
    pub fn base_speed(&self) -> &Rational {
        &self.base_speed
    }

    #[inline]
    pub fn carried(&self) -> &[PebbleId] {
        &self.carried
    }

    #[inline]
    pub fn is_carrying(&self) -> bool {
        !self.carried.is_empty()
    }

    /// With `None`: does the robot carry anything?  With `Some(p)`: does it
    /// carry `p`?
    pub fn has_pebble(&self, pebble: Option<PebbleId>) -> bool {
        match pebble {
            Some(p) => self.carried.contains(&p),
            None    => self.is_carrying(),
        }
    }

    /// Reverse the direction of travel.
    pub fn invert_direction(&mut self) {
        self.base_speed = -&self.base_speed;
    }

    pub(crate) fn attach(&mut self, pebbles: &mut [Pebble], id: PebbleId) -> RobotResult<()> {
        let pebble = pebbles.get_mut(id.index()).ok_or(RobotError::UnknownPebble(id))?;
        if let Some(holder) = pebble.holder() {
            return Err(RobotError::AlreadyHeld { pebble: id, holder });
        }
        pebble.attach_to(self.id, &self.position);
        self.carried.push(id);
        Ok(())
    }

    /// Release `which`, or the most recently picked-up pebble when `None`.
    pub(crate) fn detach(
        &mut self,
        pebbles: &mut [Pebble],
        which:   Option<PebbleId>,
    ) -> RobotResult<PebbleId> {
        if self.carried.is_empty() {
            return Err(RobotError::NothingToHold(self.id));
        }
        let slot = match which {
            None     => self.carried.len() - 1,
            Some(id) => self
                .carried
                .iter()
                .position(|&p| p == id)
                .ok_or(RobotError::NotCarried { robot: self.id, pebble: id })?,
        };

        let id = self.carried[slot];
        let pebble = pebbles.get_mut(id.index()).ok_or(RobotError::UnknownPebble(id))?;
        pebble.release();
        self.carried.remove(slot);
        Ok(id)
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// A robot: a [`RobotBody`] plus the controller bound to it for life.
///
/// Every collision notification is a pass-through to the controller; the
/// robot itself never decides how to react.  A robot without a controller
/// moves at its base speed and ignores all notifications.
pub struct Robot {
    body:       RobotBody,
    controller: Option<Box<dyn RobotController>>,
}

impl Robot {
    pub fn new(body: RobotBody, controller: Option<Box<dyn RobotController>>) -> Self {
        Self { body, controller }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn body(&self) -> &RobotBody {
        &self.body
    }

    #[inline]
    pub fn id(&self) -> RobotId {
        self.body.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.body.name
    }

    #[inline]
    pub fn position(&self) -> &Rational {
        &self.body.position
    }

    #[inline]
    pub fn base_speed(&self) -> &Rational {
        &self.body.base_speed
    }

    #[inline]
    pub fn carried(&self) -> &[PebbleId] {
        &self.body.carried
    }

    pub fn has_pebble(&self, pebble: Option<PebbleId>) -> bool {
        self.body.has_pebble(pebble)
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    /// The speed the robot actually travels at, as decided by its controller.
    pub fn effective_speed(&self) -> Rational {
        match &self.controller {
            Some(controller) => controller.speed(&self.body),
            None             => self.body.base_speed.clone(),
        }
    }

    // ── State changes ─────────────────────────────────────────────────────

    pub fn invert_direction(&mut self) {
        self.body.invert_direction();
    }

    /// Move for `dt` at the effective speed and drag carried pebbles along.
    pub fn advance(
        &mut self,
        dt:      &Rational,
        pebbles: &mut [Pebble],
        policy:  BoundaryPolicy,
    ) -> RobotResult<()> {
        let mut position = &self.body.position + self.effective_speed() * dt;

        if position.is_negative() || position > Rational::one() {
            match policy {
                BoundaryPolicy::Strict => {
                    return Err(RobotError::OutOfBounds { robot: self.body.id, position });
                }
                BoundaryPolicy::ClampAndWarn => {
                    warn!(robot = %self.body.id, %position, "robot moved against a wall; clamping into [0, 1]");
                    position = if position.is_negative() { Rational::zero() } else { Rational::one() };
                }
            }
        }

        for &id in &self.body.carried {
            pebbles
                .get_mut(id.index())
                .ok_or(RobotError::UnknownPebble(id))?
                .follow(&position);
        }
        self.body.position = position;
        Ok(())
    }

    /// Pick up `pebble` and notify the controller's take hook.
    pub fn take(&mut self, pebbles: &mut [Pebble], pebble: PebbleId) -> RobotResult<()> {
        self.body.attach(pebbles, pebble)?;
        if let (Some(controller), Some(p)) = (self.controller.as_deref_mut(), pebbles.get(pebble.index())) {
            controller.on_take(&self.body, p);
        }
        Ok(())
    }

    /// Drop `pebble` (the last one picked up when `None`) and notify the
    /// controller's drop hook.  Returns the id of the dropped pebble.
    pub fn drop_pebble(
        &mut self,
        pebbles: &mut [Pebble],
        pebble:  Option<PebbleId>,
    ) -> RobotResult<PebbleId> {
        let dropped = self.body.detach(pebbles, pebble)?;
        if let (Some(controller), Some(p)) = (self.controller.as_deref_mut(), pebbles.get(dropped.index())) {
            controller.on_drop(&self.body, p);
        }
        Ok(dropped)
    }

    // ── Controller notifications ──────────────────────────────────────────

    pub fn on_begin_event(&mut self) {
        if let Some(controller) = self.controller.as_deref_mut() {
            controller.begin_event(&self.body);
        }
    }

    pub fn on_end_event(&mut self) {
        if let Some(controller) = self.controller.as_deref_mut() {
            controller.end_event(&self.body);
        }
    }

    /// `own_speed` and `other_speed` are the speeds both robots had before
    /// this event's reactions started.
    pub fn on_collision_with_robot(
        &mut self,
        own_speed:   &Rational,
        other:       &RobotBody,
        other_speed: &Rational,
        pebbles:     &mut [Pebble],
    ) -> RobotResult<()> {
        self.dispatch(pebbles, |controller, handle| {
            controller.on_collision_with_robot(handle, own_speed, other, other_speed)
        })
    }

    pub fn on_collision_with_pebble(
        &mut self,
        pebble:  PebbleId,
        pebbles: &mut [Pebble],
    ) -> RobotResult<()> {
        self.dispatch(pebbles, |controller, handle| {
            controller.on_collision_with_pebble(handle, pebble)
        })
    }

    pub fn on_collision_with_wall(&mut self, pebbles: &mut [Pebble]) -> RobotResult<()> {
        self.dispatch(pebbles, |controller, handle| controller.on_collision_with_wall(handle))
    }

    /// Run a collision hook against a [`RobotHandle`], then fire the
    /// take/drop hooks for every transfer the hook performed, in order.
    fn dispatch<F>(&mut self, pebbles: &mut [Pebble], hook: F) -> RobotResult<()>
    where
        F: FnOnce(&mut dyn RobotController, &mut RobotHandle<'_>) -> RobotResult<()>,
    {
        let Some(controller) = self.controller.as_deref_mut() else {
            return Ok(());
        };

        let mut handle = RobotHandle::new(&mut self.body, pebbles);
        let outcome = hook(&mut *controller, &mut handle);
        let transfers = handle.into_transfers();

        for transfer in transfers {
            match transfer {
                Transfer::Took(id) => {
                    if let Some(p) = pebbles.get(id.index()) {
                        controller.on_take(&self.body, p);
                    }
                }
                Transfer::Dropped(id) => {
                    if let Some(p) = pebbles.get(id.index()) {
                        controller.on_drop(&self.body, p);
                    }
                }
            }
        }
        outcome
    }
}

impl fmt::Debug for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Robot")
            .field("body", &self.body)
            .field("has_controller", &self.controller.is_some())
            .finish()
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.body.name, self.body.position, self.body.base_speed)
    }
}
