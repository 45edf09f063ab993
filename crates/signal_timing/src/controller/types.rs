use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::calculator::{TimingSnapshot, TimingStatistics};
use crate::congestion::CongestionLevel;
use crate::phase_machine::SignalPhase;

/// Hook invoked with every snapshot that was applied to the phase machine.
pub type TimingCallback = Box<dyn FnMut(&TimingSnapshot) + Send + Sync>;

/// One applied green change. Controllers keep the most recent 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingChangeRecord {
    pub timestamp: SystemTime,
    pub old_green: u32,
    pub new_green: u32,
    pub vehicle_count: u32,
    pub congestion_level: CongestionLevel,
    pub reason: String,
}

/// Merged view of phase-machine state, calculator statistics and
/// controller counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalStatus {
    pub signal_id: String,
    pub signal_state: SignalPhase,
    pub is_running: bool,
    pub time_remaining: f32,
    pub green_duration: u32,
    pub yellow_duration: u32,
    pub red_duration: u32,
    pub current_vehicle_count: u32,
    pub timing_updates_count: u64,
    pub calculator_stats: TimingStatistics,
    pub emergency_active: bool,
    pub emergency_reason: Option<String>,
    pub last_timing_update: Option<SystemTime>,
}
