//! `brigade-output` — trajectory recording for the bucket-brigade simulator.
//!
//! | Backend | Files created                                   |
//! |---------|-------------------------------------------------|
//! | CSV     | `robots.csv`, `pebbles.csv`, `steps.csv`        |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`TrajectoryObserver`], which implements `brigade_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use brigade_output::{CsvWriter, TrajectoryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut sim = LineSimulatorBuilder::new()
//!     .controller_factory(factory)
//!     .observer(TrajectoryObserver::new(writer))
//!     .build();
//! scenario.populate(&mut sim)?;
//! sim.simulate(5, None)?;
//! let mut obs = sim.into_observer();
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrajectoryObserver;
pub use row::{PebbleRow, RobotRow, StepRow};
pub use writer::OutputWriter;
