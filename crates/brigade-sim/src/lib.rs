//! `brigade-sim` — the event-driven engine of the bucket-brigade simulator.
//!
//! # Event loop
//!
//! ```text
//! loop (step):
//!   ① Sort      — robots by (position, base_speed), stable.
//!   ② Next event — min over adjacent robot meetings, robot/free-pebble
//!                  meetings, and wall hits of the two outermost robots.
//!   ③ Advance   — every robot by speed × Δ; carried pebbles follow; clock += Δ.
//!   ④ Resolve   — begin_event → pebbles + wall per robot → robot pairs
//!                  (pre-resolution speeds) → end_event.  Skipped when a
//!                  max_step cap stops the step short of the event.
//!   ⑤ Observe   — SimObserver::on_step(&SimView).
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use brigade_control::PebbleSlowdownFactory;
//! use brigade_sim::LineSimulatorBuilder;
//!
//! let mut sim = LineSimulatorBuilder::new()
//!     .controller_factory(PebbleSlowdownFactory::new("1/2")?)
//!     .build();
//! sim.create_robot("0", "1", None, None)?;
//! sim.create_robot("1", "-1", None, None)?;
//! sim.create_pebble("0.25", None)?;
//! sim.simulate(5, None)?;
//! println!("{}", sim.snapshot().to_json()?);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::LineSimulatorBuilder;
pub use error::{SimError, SimResult};
pub use observer::{CallbackObserver, NoopObserver, SimObserver, SimView};
pub use scenario::{ExactInput, PebbleSpec, RobotSpec, ScenarioConfig};
pub use sim::{LineSimulator, meeting_time, wall_time};
pub use snapshot::{PebbleSnapshot, RobotSnapshot, SimSnapshot};
