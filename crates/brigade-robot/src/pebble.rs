//! Pebbles — markers that robots pick up and carry.

use brigade_core::{CoreError, CoreResult, PebbleId, Rational, RobotId};
use num_traits::{One, Signed};

/// A point marker on the unit interval.
///
/// While `holder` is set the pebble's position is slaved to the holder's
/// position; only [`RobotBody`][crate::RobotBody] take/drop and robot
/// movement change these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pebble {
    id:       PebbleId,
    name:     String,
    position: Rational,
    holder:   Option<RobotId>,
}

impl Pebble {
    /// A free pebble at `position`.  Unnamed pebbles are called `p<id>`.
    pub fn new(id: PebbleId, position: Rational, name: Option<String>) -> CoreResult<Self> {
        if position.is_negative() || position > Rational::one() {
            return Err(CoreError::PositionOutOfRange(position));
        }
        Ok(Self {
            id,
            name: name.unwrap_or_else(|| format!("p{}", id.0)),
            position,
            holder: None,
        })
    }

    #[inline]
    pub fn id(&self) -> PebbleId {
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

    /// The robot currently carrying this pebble, if any.
    #[inline]
    pub fn holder(&self) -> Option<RobotId> {
        self.holder
    }

    #[inline]
    pub fn is_taken(&self) -> bool {
        self.holder.is_some()
    }

    pub(crate) fn attach_to(&mut self, robot: RobotId, at: &Rational) {
        self.holder = Some(robot);
        self.position = at.clone();
    }

    pub(crate) fn release(&mut self) {
        self.holder = None;
    }

    pub(crate) fn follow(&mut self, at: &Rational) {
        self.position = at.clone();
    }
}
