//! Timing defaults and runtime configuration.
//!
//! [`TimingParams`] carries the per-signal tunables consumed by
//! [`crate::calculator::TimingCalculator`]. [`SignalNetworkConfig`] describes a
//! whole intersection (registered signals, tick rate, initially selected lane)
//! and is loaded from JSON by the harness binary.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lane_gateway::Lane;

/// Total seconds of green + yellow + red for one approach.
pub const DEFAULT_CYCLE_TIME: u32 = 90;
pub const DEFAULT_MIN_GREEN: u32 = 15;
pub const DEFAULT_MAX_GREEN: u32 = 60;
pub const DEFAULT_YELLOW: u32 = 4;
/// Red never drops below this, even when green + yellow fills the cycle.
pub const DEFAULT_MIN_RED: u32 = 10;
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
/// Largest change in green (seconds) allowed between consecutive updates.
pub const DEFAULT_MAX_STEP: u32 = 5;

/// Green duration of every lane phase the gateway is not driving.
pub const DEFAULT_PHASE_GREEN: u32 = 35;

/// Timing-change records kept per controller.
pub const TIMING_HISTORY_CAPACITY: usize = 100;
/// Raw vehicle-count samples kept by the lane gateway.
pub const COUNT_HISTORY_CAPACITY: usize = 20;

/// External tick interval bounds (milliseconds).
pub const MIN_TICK_INTERVAL_MS: u64 = 100;
pub const MAX_TICK_INTERVAL_MS: u64 = 500;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;

// ---------------------------------------------------------------------------
// TimingParams
// ---------------------------------------------------------------------------

/// Tunables for one timing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    pub base_cycle_time: u32,
    pub min_green: u32,
    pub max_green: u32,
    pub yellow_duration: u32,
    pub smoothing_enabled: bool,
    /// Histories retain `2 * smoothing_window` samples.
    pub smoothing_window: usize,
    pub max_step: u32,
    pub min_red: u32,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            base_cycle_time: DEFAULT_CYCLE_TIME,
            min_green: DEFAULT_MIN_GREEN,
            max_green: DEFAULT_MAX_GREEN,
            yellow_duration: DEFAULT_YELLOW,
            smoothing_enabled: true,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            max_step: DEFAULT_MAX_STEP,
            min_red: DEFAULT_MIN_RED,
        }
    }
}

impl TimingParams {
    /// Params with the given cycle and green bounds, everything else default.
    pub fn with_bounds(base_cycle_time: u32, min_green: u32, max_green: u32) -> Self {
        Self {
            base_cycle_time,
            min_green,
            max_green,
            ..Default::default()
        }
    }

    /// Number of samples each calculator history retains.
    pub fn history_capacity(&self) -> usize {
        self.smoothing_window.saturating_mul(2)
    }

    /// Normalise degenerate values: swapped green bounds and a zero
    /// smoothing window.
    pub fn validated(mut self) -> Self {
        if self.min_green > self.max_green {
            warn!(
                "TimingParams: min_green {}s exceeds max_green {}s, swapping",
                self.min_green, self.max_green
            );
            std::mem::swap(&mut self.min_green, &mut self.max_green);
        }
        if self.smoothing_window == 0 {
            warn!("TimingParams: smoothing_window was 0; forcing to 1");
            self.smoothing_window = 1;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// SignalNetworkConfig
// ---------------------------------------------------------------------------

/// One signal to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub id: String,
    /// Free-form approach label, e.g. `north-south`.
    pub direction: String,
    #[serde(default)]
    pub params: TimingParams,
}

impl SignalSpec {
    pub fn new(id: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            direction: direction.into(),
            params: TimingParams::default(),
        }
    }
}

/// Intersection-wide configuration consumed by [`crate::SignalTimingPlugin`].
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalNetworkConfig {
    /// Interval of the external scheduling loop driving `update()`.
    pub tick_interval_ms: u64,
    pub signals: Vec<SignalSpec>,
    pub selected_lane: Option<Lane>,
}

impl Default for SignalNetworkConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            signals: vec![
                SignalSpec::new("signal_ns", "north-south"),
                SignalSpec::new("signal_ew", "east-west"),
            ],
            selected_lane: Some(Lane::East),
        }
    }
}

impl SignalNetworkConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tick interval clamped to the supported 100-500 ms range.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(
            self.tick_interval_ms
                .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS),
        )
    }
}
