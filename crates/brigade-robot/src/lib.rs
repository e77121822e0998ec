//! `brigade-robot` — the entities that live on the line and the controller
//! extension point.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`pebble`]     | `Pebble` — a point that is either lying on the line or held    |
//! | [`robot`]      | `Robot`, `RobotBody`, `BoundaryPolicy`                         |
//! | [`handle`]     | `RobotHandle` — mutable robot + pebble table for hook bodies   |
//! | [`controller`] | `RobotController` trait, `ControllerFactory`                   |
//! | [`error`]      | `RobotError`, `RobotResult<T>`                                 |
//!
//! # Ownership
//!
//! The simulator owns every robot and a single pebble table indexed by
//! `PebbleId`.  A robot records the ids of the pebbles it carries and each
//! pebble records its holder, so every operation that touches both takes the
//! pebble table as an explicit `&mut [Pebble]` argument.  A robot owns its
//! controller outright; the controller never sees the simulator's
//! collections, only the robot it is bound to.

pub mod controller;
pub mod error;
pub mod handle;
pub mod pebble;
pub mod robot;


pub use controller::{ControllerFactory, RobotController};
pub use error::{RobotError, RobotResult};
pub use handle::RobotHandle;
pub use pebble::Pebble;
pub use robot::{BoundaryPolicy, Robot, RobotBody};
