use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SignalError;

/// One of the four monitored approaches of the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    North,
    South,
    East,
    West,
}

impl Lane {
    pub const ALL: [Lane; 4] = [Lane::North, Lane::South, Lane::East, Lane::West];

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::North => "north",
            Lane::South => "south",
            Lane::East => "east",
            Lane::West => "west",
        }
    }

    /// Static wiring of this lane to its camera zone and its green phase.
    pub fn binding(self) -> LaneBinding {
        let (detection_zone, phase_slot) = match self {
            Lane::North => (DetectionZone::North, PhaseSlot(5)),
            Lane::South => (DetectionZone::South, PhaseSlot(1)),
            Lane::East => (DetectionZone::East, PhaseSlot(7)),
            Lane::West => (DetectionZone::West, PhaseSlot(3)),
        };
        LaneBinding {
            lane: self,
            detection_zone,
            phase_slot,
        }
    }

    pub fn phase_slot(self) -> PhaseSlot {
        self.binding().phase_slot
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lane::ALL
            .into_iter()
            .find(|lane| lane.as_str() == s)
            .ok_or_else(|| SignalError::UnknownLane(s.to_string()))
    }
}

/// Detection zone whose vehicle counts feed a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionZone {
    North,
    South,
    East,
    West,
}

impl DetectionZone {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionZone::North => "NORTH",
            DetectionZone::South => "SOUTH",
            DetectionZone::East => "EAST",
            DetectionZone::West => "WEST",
        }
    }
}

impl fmt::Display for DetectionZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numbered green phase of the intersection controller (`PHASE_n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhaseSlot(pub u8);

impl fmt::Display for PhaseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PHASE_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneBinding {
    pub lane: Lane,
    pub detection_zone: DetectionZone,
    pub phase_slot: PhaseSlot,
}
