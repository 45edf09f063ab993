use bevy::prelude::*;

use crate::calculator::TimingSnapshot;
use crate::lane_gateway::{Lane, LaneTimingUpdate};

/// Where a vehicle count should be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountTarget {
    /// A signal registered with the orchestrator.
    Signal(String),
    /// Whichever lane the gateway currently has selected.
    SelectedLane,
}

/// A fresh count from the detection pipeline. Negative counts are treated
/// as zero.
#[derive(Event, Debug, Clone)]
pub struct VehicleCountReport {
    pub target: CountTarget,
    pub count: i64,
}

impl VehicleCountReport {
    pub fn signal(signal_id: impl Into<String>, count: i64) -> Self {
        Self {
            target: CountTarget::Signal(signal_id.into()),
            count,
        }
    }

    pub fn selected_lane(count: i64) -> Self {
        Self {
            target: CountTarget::SelectedLane,
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencyAction {
    Activate { reason: String },
    Reset,
}

/// Emergency-vehicle preemption request for one signal.
#[derive(Event, Debug, Clone)]
pub struct EmergencyCommand {
    pub signal_id: String,
    pub action: EmergencyAction,
}

impl EmergencyCommand {
    pub fn activate(signal_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            signal_id: signal_id.into(),
            action: EmergencyAction::Activate {
                reason: reason.into(),
            },
        }
    }

    pub fn reset(signal_id: impl Into<String>) -> Self {
        Self {
            signal_id: signal_id.into(),
            action: EmergencyAction::Reset,
        }
    }
}

/// Fired when a snapshot was applied to a signal's phase machine.
#[derive(Event, Debug, Clone)]
pub struct SignalTimingChanged {
    pub signal_id: String,
    pub snapshot: TimingSnapshot,
}

/// Fired after every count processed for the selected lane.
#[derive(Event, Debug, Clone)]
pub struct LaneTimingUpdated {
    pub lane: Lane,
    pub update: LaneTimingUpdate,
}
