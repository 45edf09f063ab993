use std::sync::Arc;
use std::time::SystemTime;

use bevy::prelude::*;

use crate::calculator::{clamp_vehicle_count, TimingCalculator, TimingSnapshot};
use crate::config::{TimingParams, TIMING_HISTORY_CAPACITY};
use crate::history::RingBuffer;
use crate::phase_machine::{
    PhaseDurations, PhaseMachine, SignalClock, SignalPhase, SignalStateMachine,
};

use super::types::{SignalStatus, TimingCallback, TimingChangeRecord};

/// Dynamic timing for one signal: owns its calculator and its phase machine.
pub struct SignalController<M: PhaseMachine = SignalStateMachine> {
    signal_id: String,
    machine: M,
    calculator: TimingCalculator,
    current_vehicle_count: u32,
    timing_updates_count: u64,
    change_history: RingBuffer<TimingChangeRecord>,
    last_timing_update: Option<SystemTime>,
    on_timing_change: Option<TimingCallback>,
}

impl SignalController<SignalStateMachine> {
    /// Controller driving a stock [`SignalStateMachine`] on `clock`.
    pub fn with_clock(
        signal_id: impl Into<String>,
        params: TimingParams,
        clock: Arc<dyn SignalClock>,
    ) -> Self {
        let signal_id = signal_id.into();
        let machine_id = signal_id.clone();
        Self::build(signal_id, params, move |durations| {
            SignalStateMachine::new(machine_id, durations, clock)
        })
    }
}

impl<M: PhaseMachine> SignalController<M> {
    /// Wrap an existing phase machine. Its durations are overwritten with the
    /// empty-lane timing.
    pub fn new(signal_id: impl Into<String>, params: TimingParams, machine: M) -> Self {
        let signal_id = signal_id.into();
        let log_id = signal_id.clone();
        Self::build(signal_id, params, move |durations| {
            let mut machine = machine;
            if let Err(e) = machine.set_durations(durations) {
                warn!(
                    "Signal {}: phase machine rejected initial timing: {}",
                    log_id, e
                );
            }
            machine
        })
    }

    fn build(
        signal_id: String,
        params: TimingParams,
        make_machine: impl FnOnce(PhaseDurations) -> M,
    ) -> Self {
        let mut calculator = TimingCalculator::new(params);
        let initial = calculator.calculate(0);
        let machine = make_machine(PhaseDurations::from(&initial));

        info!("SignalController initialized for {}", signal_id);

        Self {
            signal_id,
            machine,
            calculator,
            current_vehicle_count: 0,
            timing_updates_count: 0,
            change_history: RingBuffer::new(TIMING_HISTORY_CAPACITY),
            last_timing_update: None,
            on_timing_change: None,
        }
    }

    /// Register the hook called with every applied snapshot.
    pub fn with_timing_callback(mut self, callback: TimingCallback) -> Self {
        self.on_timing_change = Some(callback);
        self
    }

    pub fn set_timing_callback(&mut self, callback: Option<TimingCallback>) {
        self.on_timing_change = callback;
    }

    pub fn signal_id(&self) -> &str {
        &self.signal_id
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn calculator(&self) -> &TimingCalculator {
        &self.calculator
    }

    pub fn current_vehicle_count(&self) -> u32 {
        self.current_vehicle_count
    }

    /// Number of snapshots applied to the phase machine over the
    /// controller's lifetime.
    pub fn timing_updates_count(&self) -> u64 {
        self.timing_updates_count
    }

    pub fn start(&mut self) {
        self.machine.start();
        info!("Dynamic signal {} started", self.signal_id);
    }

    pub fn stop(&mut self) {
        self.machine.stop();
        info!("Dynamic signal {} stopped", self.signal_id);
    }

    /// Recompute timing for a new count and apply it when allowed.
    ///
    /// A snapshot is always computed. It is written into the phase machine
    /// only when the machine is timing its current phase, no emergency is
    /// active, and the new green differs from the one in force. Returns
    /// whether the snapshot was applied.
    pub fn update_vehicle_count(&mut self, vehicle_count: i64) -> bool {
        self.current_vehicle_count = clamp_vehicle_count(vehicle_count);
        let snapshot = self.calculator.calculate(vehicle_count);

        if !self.should_apply(&snapshot) {
            return false;
        }
        self.apply(snapshot)
    }

    fn should_apply(&self, snapshot: &TimingSnapshot) -> bool {
        if !self.machine.has_started_timing() {
            return false;
        }
        if self.machine.state_info().emergency_active {
            debug!(
                "Signal {}: emergency active, holding {}s green",
                self.signal_id,
                self.machine.durations().green
            );
            return false;
        }
        self.machine.durations().green != snapshot.green_duration
    }

    fn apply(&mut self, snapshot: TimingSnapshot) -> bool {
        let old_green = self.machine.durations().green;

        if let Err(e) = self.machine.set_durations(PhaseDurations::from(&snapshot)) {
            warn!(
                "Signal {}: failed to apply {}s green, keeping {}s: {}",
                self.signal_id, snapshot.green_duration, old_green, e
            );
            return false;
        }

        let now = SystemTime::now();
        self.last_timing_update = Some(now);
        self.timing_updates_count += 1;
        self.change_history.push(TimingChangeRecord {
            timestamp: now,
            old_green,
            new_green: snapshot.green_duration,
            vehicle_count: snapshot.vehicle_count,
            congestion_level: snapshot.congestion_level,
            reason: snapshot.reason.clone(),
        });

        info!(
            "Signal {} timing updated: {}s -> {}s green ({} vehicles, {})",
            self.signal_id,
            old_green,
            snapshot.green_duration,
            snapshot.vehicle_count,
            snapshot.congestion_level
        );

        if let Some(callback) = self.on_timing_change.as_mut() {
            callback(&snapshot);
        }
        true
    }

    /// Advance the phase machine. Call every 100-500 ms from the scheduling
    /// loop.
    pub fn update(&mut self) -> Option<SignalPhase> {
        self.machine.update()
    }

    pub fn activate_emergency(&mut self, reason: &str) -> bool {
        let activated = self.machine.activate_emergency(reason);
        if activated {
            warn!(
                "Signal {} emergency mode activated: {}",
                self.signal_id, reason
            );
        }
        activated
    }

    pub fn reset_to_normal(&mut self) -> bool {
        let reset = self.machine.reset_to_normal();
        if reset {
            info!("Signal {} reset to normal operation", self.signal_id);
        }
        reset
    }

    pub fn get_status(&self) -> SignalStatus {
        let info = self.machine.state_info();
        let durations = self.machine.durations();

        SignalStatus {
            signal_id: self.signal_id.clone(),
            signal_state: info.current_state,
            is_running: info.is_running,
            time_remaining: info.time_remaining,
            green_duration: durations.green,
            yellow_duration: durations.yellow,
            red_duration: durations.red,
            current_vehicle_count: self.current_vehicle_count,
            timing_updates_count: self.timing_updates_count,
            calculator_stats: self.calculator.statistics(),
            emergency_active: info.emergency_active,
            emergency_reason: info.emergency_reason,
            last_timing_update: self.last_timing_update,
        }
    }

    /// The newest `limit` applied changes, oldest first.
    pub fn timing_change_history(&self, limit: usize) -> Vec<TimingChangeRecord> {
        self.change_history.recent(limit).cloned().collect()
    }
}
