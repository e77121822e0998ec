//! Serializable position-and-velocity summary of a simulator.
//!
//! Every rational is rendered as an exact string (`"1/4"`, `"-3"`), so a
//! snapshot survives a JSON round trip without losing precision and can be
//! fed back through [`LineSimulator::load_snapshot`][crate::LineSimulator::load_snapshot].

use brigade_core::{PebbleId, Rational, RobotId, parse_exact};
use brigade_robot::{Pebble, Robot};
use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotSnapshot {
    pub name:       String,
    pub id:         u32,
    pub position:   String,
    /// Effective speed at capture time.
    pub speed:      String,
    pub base_speed: String,
    /// Carried pebble ids in pickup order.
    #[serde(default)]
    pub carried:    Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PebbleSnapshot {
    pub name:     String,
    pub id:       u32,
    pub position: String,
    /// Id of the robot holding the pebble, if any.
    #[serde(default)]
    pub taken_by: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time:    String,
    pub robots:  Vec<RobotSnapshot>,
    pub pebbles: Vec<PebbleSnapshot>,
}

impl SimSnapshot {
    /// Capture the given state.  Robots appear in the order given (the
    /// simulator's current sort order), pebbles in id order.
    pub fn capture(time: &Rational, robots: &[Robot], pebbles: &[Pebble]) -> Self {
        Self {
            time:    time.to_string(),
            robots:  robots.iter().map(RobotSnapshot::from).collect(),
            pebbles: pebbles.iter().map(PebbleSnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The robot snapshot with the given id.
    pub fn robot(&self, id: RobotId) -> Option<&RobotSnapshot> {
        self.robots.iter().find(|r| r.id == id.0)
    }

    /// The pebble snapshot with the given id.
    pub fn pebble(&self, id: PebbleId) -> Option<&PebbleSnapshot> {
        self.pebbles.iter().find(|p| p.id == id.0)
    }
}

impl From<&Robot> for RobotSnapshot {
    fn from(robot: &Robot) -> Self {
        Self {
            name:       robot.name().to_owned(),
            id:         robot.id().0,
            position:   robot.position().to_string(),
            speed:      robot.effective_speed().to_string(),
            base_speed: robot.base_speed().to_string(),
            carried:    robot.carried().iter().map(|p| p.0).collect(),
        }
    }
}

impl From<&Pebble> for PebbleSnapshot {
    fn from(pebble: &Pebble) -> Self {
        Self {
            name:     pebble.name().to_owned(),
            id:       pebble.id().0,
            position: pebble.position().to_string(),
            taken_by: pebble.holder().map(|r| r.0),
        }
    }
}

/// Parse an exact field, naming it in the error.
pub(crate) fn exact_field(field: &str, value: &str) -> SimResult<Rational> {
    parse_exact(value).map_err(|e| SimError::Snapshot(format!("{field} {value:?}: {e}")))
}
