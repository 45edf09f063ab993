use std::time::SystemTime;

use bevy::prelude::*;

use crate::config::TimingParams;
use crate::congestion::{classify, CONGESTION_BUCKETS};
use crate::cycle::allocate_cycle;
use crate::history::RingBuffer;
use crate::smoothing::smooth_green;

use super::types::{TimingSnapshot, TimingStatistics};

/// Clamp a raw detector count to a non-negative vehicle count.
///
/// Detection noise can produce negative values; they count as an empty lane.
pub fn clamp_vehicle_count(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-lane timing state: configuration plus bounded histories.
#[derive(Debug, Clone)]
pub struct TimingCalculator {
    params: TimingParams,
    green_history: RingBuffer<u32>,
    vehicle_history: RingBuffer<u32>,
    last_snapshot: Option<TimingSnapshot>,
}

impl Default for TimingCalculator {
    fn default() -> Self {
        Self::new(TimingParams::default())
    }
}

impl TimingCalculator {
    pub fn new(params: TimingParams) -> Self {
        let params = params.validated();

        for bucket in &CONGESTION_BUCKETS {
            if bucket.suggested_green < params.min_green
                || bucket.suggested_green > params.max_green
            {
                warn!(
                    "TimingCalculator: {} suggestion {}s lies outside green bounds {}-{}s and will be clamped",
                    bucket.level, bucket.suggested_green, params.min_green, params.max_green
                );
            }
        }

        info!(
            "TimingCalculator initialized: cycle_time={}s, green={}-{}s",
            params.base_cycle_time, params.min_green, params.max_green
        );

        let capacity = params.history_capacity();
        Self {
            params,
            green_history: RingBuffer::new(capacity),
            vehicle_history: RingBuffer::new(capacity),
            last_snapshot: None,
        }
    }

    pub fn params(&self) -> &TimingParams {
        &self.params
    }

    /// Compute the timing for a new vehicle count and record it.
    ///
    /// Classify, damp against the last retained green (when smoothing is on),
    /// clamp to `[min_green, max_green]`, then hand the rest of the cycle to
    /// red.
    pub fn calculate(&mut self, raw_vehicle_count: i64) -> TimingSnapshot {
        let vehicle_count = clamp_vehicle_count(raw_vehicle_count);
        let (congestion_level, suggested_green) = classify(vehicle_count);

        let smoothed = if self.params.smoothing_enabled {
            smooth_green(
                suggested_green,
                self.green_history.last().copied(),
                self.params.max_step,
            )
        } else {
            suggested_green
        };
        let green = smoothed.clamp(self.params.min_green, self.params.max_green);

        let cycle = allocate_cycle(
            green,
            self.params.yellow_duration,
            self.params.base_cycle_time,
            self.params.min_red,
        );

        self.green_history.push(green);
        self.vehicle_history.push(vehicle_count);

        let snapshot = TimingSnapshot {
            green_duration: cycle.green,
            yellow_duration: cycle.yellow,
            red_duration: cycle.red,
            congestion_level,
            vehicle_count,
            timestamp: SystemTime::now(),
            reason: congestion_level.reason().to_string(),
        };
        self.last_snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Most recent snapshot, if any update happened since the last reset.
    pub fn last_snapshot(&self) -> Option<&TimingSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Retained greens, oldest first.
    pub fn green_history(&self) -> impl Iterator<Item = u32> + '_ {
        self.green_history.iter().copied()
    }

    /// Retained vehicle counts, oldest first.
    pub fn vehicle_history(&self) -> impl Iterator<Item = u32> + '_ {
        self.vehicle_history.iter().copied()
    }

    /// Statistics over the retained window only.
    ///
    /// With no samples, the green averages and extremes fall back to the
    /// configured bounds.
    pub fn statistics(&self) -> TimingStatistics {
        let average_vehicle_count = if self.vehicle_history.is_empty() {
            0.0
        } else {
            self.vehicle_history.iter().map(|&v| f64::from(v)).sum::<f64>()
                / self.vehicle_history.len() as f64
        };

        let average_green_duration = if self.green_history.is_empty() {
            f64::from(self.params.min_green)
        } else {
            self.green_history.iter().map(|&g| f64::from(g)).sum::<f64>()
                / self.green_history.len() as f64
        };

        TimingStatistics {
            average_vehicle_count: round2(average_vehicle_count),
            average_green_duration: round2(average_green_duration),
            min_green_observed: self
                .green_history
                .iter()
                .copied()
                .min()
                .unwrap_or(self.params.min_green),
            max_green_observed: self
                .green_history
                .iter()
                .copied()
                .max()
                .unwrap_or(self.params.max_green),
            total_adjustments: self.green_history.len(),
            history_samples: self.vehicle_history.len(),
        }
    }

    /// Clear histories and the last snapshot. Configuration is kept.
    pub fn reset(&mut self) {
        self.green_history.clear();
        self.vehicle_history.clear();
        self.last_snapshot = None;
        info!("TimingCalculator history reset");
    }
}
