//! `RobotHandle` — the mutable view a controller hook gets of its robot.

use brigade_core::PebbleId;

use crate::{Pebble, RobotBody, RobotResult};

/// A pebble ownership change made from inside a collision hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    Took(PebbleId),
    Dropped(PebbleId),
}

/// Mutable access to one robot and the pebble table, handed to the
/// collision hooks of a [`RobotController`][crate::RobotController].
///
/// The controller is exclusively borrowed while its hook runs, so take and
/// drop performed here cannot call back into it.  They are recorded instead
/// and the robot fires `on_take`/`on_drop` for each of them, in order, as
/// soon as the hook returns.
pub struct RobotHandle<'a> {
    body:      &'a mut RobotBody,
    pebbles:   &'a mut [Pebble],
    transfers: Vec<Transfer>,
}

impl<'a> RobotHandle<'a> {
    pub(crate) fn new(body: &'a mut RobotBody, pebbles: &'a mut [Pebble]) -> Self {
        Self { body, pebbles, transfers: Vec::new() }
    }

    pub(crate) fn into_transfers(self) -> Vec<Transfer> {
        self.transfers
    }

    /// The robot this hook is running for.
    #[inline]
    pub fn robot(&self) -> &RobotBody {
        &*self.body
    }

    pub fn pebble(&self, id: PebbleId) -> Option<&Pebble> {
        self.pebbles.get(id.index())
    }

    pub fn invert_direction(&mut self) {
        self.body.invert_direction();
    }

    /// Pick up `pebble`.  Fails with `AlreadyHeld` if someone carries it.
    pub fn take_pebble(&mut self, pebble: PebbleId) -> RobotResult<()> {
        self.body.attach(&mut *self.pebbles, pebble)?;
        self.transfers.push(Transfer::Took(pebble));
        Ok(())
    }

    /// Drop `pebble`, or the last one picked up when `None`.
    pub fn drop_pebble(&mut self, pebble: Option<PebbleId>) -> RobotResult<PebbleId> {
        let dropped = self.body.detach(&mut *self.pebbles, pebble)?;
        self.transfers.push(Transfer::Dropped(dropped));
        Ok(dropped)
    }

    /// Drop everything, most recent pickup first.  Returns the dropped ids.
    pub fn drop_all(&mut self) -> RobotResult<Vec<PebbleId>> {
        let mut dropped = Vec::with_capacity(self.body.carried().len());
        while self.body.is_carrying() {
            dropped.push(self.drop_pebble(None)?);
        }
        Ok(dropped)
    }
}
