use std::time::SystemTime;

use bevy::prelude::*;

use crate::calculator::{clamp_vehicle_count, TimingCalculator};
use crate::config::{TimingParams, COUNT_HISTORY_CAPACITY, DEFAULT_PHASE_GREEN};
use crate::error::SignalError;
use crate::history::RingBuffer;

use super::lanes::{Lane, LaneBinding};
use super::phase_plan::{IntersectionPhasePlan, PhaseTimingSink};
use super::types::{
    CountSample, LaneGatewayStatistics, LaneGatewayStatus, LaneSelection, LaneTimingUpdate,
};

/// Derived state of the one lane currently under dynamic timing.
struct ActiveLane {
    binding: LaneBinding,
    calculator: TimingCalculator,
    vehicle_count: u32,
    timing_updates: u64,
    last_update: Option<SystemTime>,
    count_history: RingBuffer<CountSample>,
}

impl ActiveLane {
    fn new(lane: Lane) -> Self {
        Self {
            binding: lane.binding(),
            calculator: TimingCalculator::new(TimingParams::default()),
            vehicle_count: 0,
            timing_updates: 0,
            last_update: None,
            count_history: RingBuffer::new(COUNT_HISTORY_CAPACITY),
        }
    }
}

/// Single-lane dynamic timing.
///
/// At most one lane is selected. Its counts drive a private calculator whose
/// green is written into that lane's phase slot only; every other slot keeps
/// the default 35s.
#[derive(Resource)]
pub struct LaneSelectionGateway<P: PhaseTimingSink = IntersectionPhasePlan> {
    plan: P,
    active: Option<ActiveLane>,
}

impl Default for LaneSelectionGateway<IntersectionPhasePlan> {
    fn default() -> Self {
        Self::new(IntersectionPhasePlan::default())
    }
}

impl<P: PhaseTimingSink> LaneSelectionGateway<P> {
    pub fn new(plan: P) -> Self {
        info!("LaneSelectionGateway initialized, waiting for lane selection");
        Self { plan, active: None }
    }

    pub fn plan(&self) -> &P {
        &self.plan
    }

    pub fn selected_lane(&self) -> Option<Lane> {
        self.active.as_ref().map(|a| a.binding.lane)
    }

    /// Select a lane by name (`north`, `south`, `east`, `west`).
    pub fn select(&mut self, lane: &str) -> Result<LaneSelection, SignalError> {
        let lane: Lane = lane.parse()?;
        Ok(self.select_lane(lane))
    }

    /// Start dynamic timing on `lane`, discarding everything accumulated for
    /// the previously selected lane. The previous lane's slot returns to the
    /// default green.
    pub fn select_lane(&mut self, lane: Lane) -> LaneSelection {
        self.release_active();
        let active = ActiveLane::new(lane);
        let binding = active.binding;
        self.active = Some(active);

        info!(
            "Lane selected: {} (zone {}, phase {}), other lanes stay at {}s",
            lane, binding.detection_zone, binding.phase_slot, DEFAULT_PHASE_GREEN
        );

        LaneSelection {
            lane,
            detection_zone: binding.detection_zone,
            phase_slot: binding.phase_slot,
        }
    }

    /// Feed a vehicle count for the selected lane and write the resulting
    /// green into its phase slot.
    pub fn update_count(&mut self, vehicle_count: i64) -> Result<LaneTimingUpdate, SignalError> {
        let active = self.active.as_mut().ok_or(SignalError::NoLaneSelected)?;
        let lane = active.binding.lane;
        let slot = active.binding.phase_slot;

        let count = clamp_vehicle_count(vehicle_count);
        if count.abs_diff(active.vehicle_count) > 1 {
            debug!("{}: {} -> {} vehicles", lane, active.vehicle_count, count);
        }
        active.vehicle_count = count;
        let now = SystemTime::now();
        active.count_history.push(CountSample {
            timestamp: now,
            count,
        });

        let snapshot = active.calculator.calculate(vehicle_count);
        let old_green = self.plan.phase_green(slot);
        let applied = match self.plan.set_phase_green(slot, snapshot.green_duration) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "{}: could not write {}s green to {}: {}",
                    lane, snapshot.green_duration, slot, e
                );
                false
            }
        };
        if let (true, Some(old)) = (applied, old_green) {
            if old != snapshot.green_duration {
                debug!("{} green {}s -> {}s", slot, old, snapshot.green_duration);
            }
        }

        active.timing_updates += 1;
        active.last_update = Some(now);

        info!(
            "{}: {} vehicles -> green {}s ({})",
            lane, count, snapshot.green_duration, snapshot.congestion_level
        );

        Ok(LaneTimingUpdate {
            lane,
            phase_slot: slot,
            vehicle_count: count,
            green_duration: snapshot.green_duration,
            yellow_duration: snapshot.yellow_duration,
            congestion_level: snapshot.congestion_level,
            applied,
        })
    }

    pub fn status(&self) -> LaneGatewayStatus {
        let phase_timings = self
            .plan
            .phase_timings()
            .into_iter()
            .map(|(slot, green)| (slot.to_string(), green))
            .collect();

        match &self.active {
            None => LaneGatewayStatus {
                selected_lane: None,
                detection_zone: None,
                phase_slot: None,
                vehicle_count: 0,
                total_updates: 0,
                phase_timings,
                last_green: None,
                last_congestion: None,
                last_update: None,
            },
            Some(active) => {
                let last = active.calculator.last_snapshot();
                LaneGatewayStatus {
                    selected_lane: Some(active.binding.lane),
                    detection_zone: Some(active.binding.detection_zone),
                    phase_slot: Some(active.binding.phase_slot),
                    vehicle_count: active.vehicle_count,
                    total_updates: active.timing_updates,
                    phase_timings,
                    last_green: last.map(|s| s.green_duration),
                    last_congestion: last.map(|s| s.congestion_level),
                    last_update: active.last_update,
                }
            }
        }
    }

    pub fn statistics(&self) -> LaneGatewayStatistics {
        match &self.active {
            None => LaneGatewayStatistics {
                selected_lane: None,
                total_timing_updates: 0,
                vehicle_count_history: Vec::new(),
                lane_statistics: None,
            },
            Some(active) => LaneGatewayStatistics {
                selected_lane: Some(active.binding.lane),
                total_timing_updates: active.timing_updates,
                vehicle_count_history: active.count_history.iter().copied().collect(),
                lane_statistics: Some(active.calculator.statistics()),
            },
        }
    }

    /// Back to "no lane selected".
    pub fn reset(&mut self) {
        self.release_active();
        info!("Dynamic lane timing reset");
    }

    fn release_active(&mut self) {
        let Some(previous) = self.active.take() else {
            return;
        };
        let slot = previous.binding.phase_slot;
        if let Err(e) = self.plan.set_phase_green(slot, DEFAULT_PHASE_GREEN) {
            warn!("{}: could not restore {} to default green: {}", previous.binding.lane, slot, e);
        }
    }
}
