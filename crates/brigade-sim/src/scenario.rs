//! JSON scenario files.
//!
//! ```json
//! {
//!   "epsilon": "1/2",
//!   "duration": 5,
//!   "max_step": "0.1",
//!   "robots":  [{ "position": 0, "speed": 1 }, { "position": "1", "speed": "-1", "name": "right" }],
//!   "pebbles": [{ "position": "0.25" }]
//! }
//! ```
//!
//! Numbers may be JSON numbers (converted exactly from their binary value)
//! or strings in any form [`parse_exact`][brigade_core::parse_exact] accepts.

use std::fs;
use std::path::Path;

use brigade_core::{CoreResult, IntoExact, Rational};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{LineSimulator, SimObserver, SimResult};

/// A number as written in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExactInput {
    Text(String),
    Number(f64),
}

impl IntoExact for &ExactInput {
    fn into_exact(self) -> CoreResult<Rational> {
        match self {
            ExactInput::Text(s) => s.as_str().into_exact(),
            ExactInput::Number(x) => x.into_exact(),
        }
    }
}

impl From<&str> for ExactInput {
    fn from(s: &str) -> Self {
        ExactInput::Text(s.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotSpec {
    pub position: ExactInput,
    pub speed:    ExactInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name:     Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PebbleSpec {
    pub position: ExactInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name:     Option<String>,
}

/// Initial robots and pebbles plus optional run parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon:  Option<ExactInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<ExactInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_step: Option<ExactInput>,
    #[serde(default)]
    pub robots:   Vec<RobotSpec>,
    #[serde(default)]
    pub pebbles:  Vec<PebbleSpec>,
}

impl ScenarioConfig {
    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn epsilon(&self) -> SimResult<Option<Rational>> {
        Ok(self.epsilon.as_ref().map(IntoExact::into_exact).transpose()?)
    }

    pub fn duration(&self) -> SimResult<Option<Rational>> {
        Ok(self.duration.as_ref().map(IntoExact::into_exact).transpose()?)
    }

    pub fn max_step(&self) -> SimResult<Option<Rational>> {
        Ok(self.max_step.as_ref().map(IntoExact::into_exact).transpose()?)
    }

    /// Create every robot (through the simulator's default controller
    /// factory) and then every pebble, in file order.
    pub fn populate<O: SimObserver>(&self, sim: &mut LineSimulator<O>) -> SimResult<()> {
        for robot in &self.robots {
            sim.create_robot(&robot.position, &robot.speed, None, robot.name.as_deref())?;
        }
        for pebble in &self.pebbles {
            sim.create_pebble(&pebble.position, pebble.name.as_deref())?;
        }
        info!(robots = self.robots.len(), pebbles = self.pebbles.len(), "scenario populated");
        Ok(())
    }
}
