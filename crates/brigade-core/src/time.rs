//! Simulation time model.
//!
//! # Design
//!
//! Time is a single exact rational that only ever moves forward.  The engine
//! advances it by the (positive) gap to the next event; nothing else may
//! mutate it.  There is no wall-clock mapping: one unit of time is the time a
//! speed-1 robot needs to cross the whole unit interval.

use std::fmt;

use num_traits::{Signed, Zero};

use crate::{CoreError, CoreResult, Rational};

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic exact simulation clock, owned by one simulator instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimClock {
    now: Rational,
}

impl SimClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self { now: Rational::zero() }
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> &Rational {
        &self.now
    }

    /// Advance the clock by `delta`.
    ///
    /// Fails with [`CoreError::InvalidTimeDelta`] unless `delta > 0`; the
    /// clock is left untouched in that case.
    pub fn advance(&mut self, delta: &Rational) -> CoreResult<()> {
        if !delta.is_positive() {
            return Err(CoreError::InvalidTimeDelta(delta.clone()));
        }
        self.now = &self.now + delta;
        Ok(())
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.now)
    }
}
