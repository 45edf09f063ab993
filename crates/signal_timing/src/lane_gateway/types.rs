use std::collections::BTreeMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::calculator::TimingStatistics;
use crate::congestion::CongestionLevel;

use super::lanes::{DetectionZone, Lane, PhaseSlot};

/// Acknowledgement of a successful `select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSelection {
    pub lane: Lane,
    pub detection_zone: DetectionZone,
    pub phase_slot: PhaseSlot,
}

/// Outcome of one `update_count` on the selected lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneTimingUpdate {
    pub lane: Lane,
    pub phase_slot: PhaseSlot,
    pub vehicle_count: u32,
    pub green_duration: u32,
    pub yellow_duration: u32,
    pub congestion_level: CongestionLevel,
    /// False when the phase plan rejected the write; the old green stays.
    pub applied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSample {
    pub timestamp: SystemTime,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneGatewayStatus {
    pub selected_lane: Option<Lane>,
    pub detection_zone: Option<DetectionZone>,
    pub phase_slot: Option<PhaseSlot>,
    pub vehicle_count: u32,
    pub total_updates: u64,
    /// Keyed by `PHASE_n`.
    pub phase_timings: BTreeMap<String, u32>,
    pub last_green: Option<u32>,
    pub last_congestion: Option<CongestionLevel>,
    pub last_update: Option<SystemTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneGatewayStatistics {
    pub selected_lane: Option<Lane>,
    pub total_timing_updates: u64,
    /// Most recent samples, oldest first.
    pub vehicle_count_history: Vec<CountSample>,
    pub lane_statistics: Option<TimingStatistics>,
}
