//! `brigade-control` — ready-made [`RobotController`] strategies.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`slowdown`] | `PebbleSlowdownController` — the bucket-brigade reference policy |
//! | [`passive`]  | `PassiveController`: ghosts that only bounce off walls           |
//! | [`traced`]   | `TracedController` — decorator that logs every notification      |
//! | [`error`]    | `ControlError`, `ControlResult<T>`                               |
//!
//! Every strategy comes with a factory implementing [`ControllerFactory`] so
//! it can be installed as a simulator's default.
//!
//! [`RobotController`]: brigade_robot::RobotController
//! [`ControllerFactory`]: brigade_robot::ControllerFactory

pub mod error;
pub mod passive;
pub mod slowdown;
pub mod traced;


pub use error::{ControlError, ControlResult};
pub use passive::{PassiveController, PassiveFactory};
pub use slowdown::{PebbleSlowdownController, PebbleSlowdownFactory};
pub use traced::{TracedController, TracedFactory};
