//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `robots.csv`
//! - `pebbles.csv`
//! - `steps.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PebbleRow, RobotRow, StepRow};

pub const ROBOT_HEADER: [&str; 10] = [
    "step", "time", "time_f64", "robot_id", "name", "position", "position_f64", "speed", "base_speed", "carrying",
];
pub const PEBBLE_HEADER: [&str; 8] = [
    "step", "time", "time_f64", "pebble_id", "name", "position", "position_f64", "holder",
];
pub const STEP_HEADER: [&str; 6] = ["step", "time", "time_f64", "elapsed", "elapsed_f64", "resolved"];

/// Writes a trajectory to three CSV files.
pub struct CsvWriter {
    robots:   Writer<File>,
    pebbles:  Writer<File>,
    steps:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the three CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut robots = Writer::from_path(dir.join("robots.csv"))?;
        robots.write_record(ROBOT_HEADER)?;

        let mut pebbles = Writer::from_path(dir.join("pebbles.csv"))?;
        pebbles.write_record(PEBBLE_HEADER)?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(STEP_HEADER)?;

        Ok(Self {
            robots,
            pebbles,
            steps,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_robots(&mut self, rows: &[RobotRow]) -> OutputResult<()> {
        for row in rows {
            self.robots.write_record(&[
                row.step.to_string(),
                row.time.clone(),
                row.time_f64.to_string(),
                row.robot_id.to_string(),
                row.name.clone(),
                row.position.clone(),
                row.position_f64.to_string(),
                row.speed.clone(),
                row.base_speed.clone(),
                row.carrying.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_pebbles(&mut self, rows: &[PebbleRow]) -> OutputResult<()> {
        for row in rows {
            self.pebbles.write_record(&[
                row.step.to_string(),
                row.time.clone(),
                row.time_f64.to_string(),
                row.pebble_id.to_string(),
                row.name.clone(),
                row.position.clone(),
                row.position_f64.to_string(),
                // Empty when free.
                row.holder.map(|h| h.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.to_string(),
            row.time.clone(),
            row.time_f64.to_string(),
            row.elapsed.clone(),
            row.elapsed_f64.to_string(),
            (row.resolved as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.robots.flush()?;
        self.pebbles.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}
