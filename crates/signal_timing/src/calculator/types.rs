use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::congestion::CongestionLevel;

/// Result of one `calculate` call.
///
/// `min_green <= green_duration <= max_green` and `red_duration >= min_red`
/// always hold; yellow is the configured constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSnapshot {
    pub green_duration: u32,
    pub yellow_duration: u32,
    pub red_duration: u32,
    pub congestion_level: CongestionLevel,
    pub vehicle_count: u32,
    pub timestamp: SystemTime,
    pub reason: String,
}

impl TimingSnapshot {
    /// Seconds of green + yellow + red. Longer than the base cycle when red
    /// was floored.
    pub fn effective_cycle(&self) -> u32 {
        self.green_duration
            .saturating_add(self.yellow_duration)
            .saturating_add(self.red_duration)
    }
}

/// Aggregates over the samples a calculator currently retains.
///
/// Only the retained window counts: after more than `2 * smoothing_window`
/// updates, `total_adjustments` stops growing even though the calculator
/// keeps running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingStatistics {
    pub average_vehicle_count: f64,
    pub average_green_duration: f64,
    pub min_green_observed: u32,
    pub max_green_observed: u32,
    pub total_adjustments: usize,
    pub history_samples: usize,
}
