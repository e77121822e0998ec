//! `brigade-core` — foundational types for the bucket-brigade line simulator.
//!
//! This crate is a dependency of every other `brigade-*` crate.  It has no
//! `brigade-*` dependencies and only the numeric stack (`num-*`) plus
//! `thiserror`.
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`exact`]  | `Rational`, `IntoExact`, decimal/fraction parsing          |
//! | [`time`]   | `SimClock` — monotonic exact simulation time               |
//! | [`ids`]    | `RobotId`, `PebbleId`                                      |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |

pub mod error;
pub mod exact;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use exact::{IntoExact, Rational, parse_exact, to_f64};
pub use ids::{PebbleId, RobotId};
pub use time::SimClock;
