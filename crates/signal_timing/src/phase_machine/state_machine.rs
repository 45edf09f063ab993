use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;

use crate::error::SignalError;

use super::clock::SignalClock;
use super::types::{PhaseDurations, PhaseMachine, PhaseStateInfo, SignalPhase};

/// Stock phase machine for one signal head.
///
/// Time is read from the injected clock only in `start`, `update` and the
/// emergency transitions; `state_info` reports against the last tick, so
/// repeated reads without an intervening tick agree.
pub struct SignalStateMachine {
    signal_id: String,
    durations: PhaseDurations,
    state: SignalPhase,
    is_running: bool,
    /// Clock reading when the current phase began timing.
    state_started: Option<Duration>,
    last_tick: Duration,
    emergency_reason: Option<String>,
    /// Set when an emergency ended while stopped; the next `start` times
    /// yellow instead of entering green.
    clearance_pending: bool,
    clock: Arc<dyn SignalClock>,
}

impl SignalStateMachine {
    pub fn new(
        signal_id: impl Into<String>,
        durations: PhaseDurations,
        clock: Arc<dyn SignalClock>,
    ) -> Self {
        let last_tick = clock.now();
        Self {
            signal_id: signal_id.into(),
            durations,
            state: SignalPhase::Red,
            is_running: false,
            state_started: None,
            last_tick,
            emergency_reason: None,
            clearance_pending: false,
            clock,
        }
    }

    pub fn signal_id(&self) -> &str {
        &self.signal_id
    }

    pub fn current_state(&self) -> SignalPhase {
        self.state
    }

    fn enter(&mut self, phase: SignalPhase, now: Duration) {
        debug!(
            "Signal {} state changed: {} -> {}",
            self.signal_id,
            self.state.as_str(),
            phase.as_str()
        );
        self.state = phase;
        self.state_started = self.is_running.then_some(now);
        self.last_tick = now;
    }
}

impl PhaseMachine for SignalStateMachine {
    fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        let now = self.clock.now();
        if self.emergency_reason.is_some() || std::mem::take(&mut self.clearance_pending) {
            self.state_started = Some(now);
            self.last_tick = now;
        } else {
            self.enter(SignalPhase::Green, now);
        }
    }

    fn stop(&mut self) {
        self.is_running = false;
        self.state_started = None;
    }

    fn update(&mut self) -> Option<SignalPhase> {
        if !self.is_running {
            return None;
        }
        let now = self.clock.now();
        self.last_tick = now;

        let started = self.state_started?;
        let phase_secs = self.durations.of(self.state)?;
        if now.saturating_sub(started) < Duration::from_secs(u64::from(phase_secs)) {
            return None;
        }

        let next = self.state.next();
        self.enter(next, now);
        Some(next)
    }

    fn state_info(&self) -> PhaseStateInfo {
        let time_remaining = match (self.state_started, self.durations.of(self.state)) {
            (Some(started), Some(secs)) if self.is_running => {
                let elapsed = self.last_tick.saturating_sub(started).as_secs_f32();
                (secs as f32 - elapsed).max(0.0)
            }
            _ => 0.0,
        };

        PhaseStateInfo {
            current_state: self.state,
            is_running: self.is_running,
            time_remaining,
            emergency_active: self.emergency_reason.is_some(),
            emergency_reason: self.emergency_reason.clone(),
        }
    }

    fn has_started_timing(&self) -> bool {
        self.state_started.is_some()
    }

    fn durations(&self) -> PhaseDurations {
        self.durations
    }

    fn set_durations(&mut self, durations: PhaseDurations) -> Result<(), SignalError> {
        for (field, value) in [
            ("green", durations.green),
            ("yellow", durations.yellow),
            ("red", durations.red),
        ] {
            if value == 0 {
                return Err(SignalError::InvalidDuration { field, value });
            }
        }
        self.durations = durations;
        Ok(())
    }

    fn activate_emergency(&mut self, reason: &str) -> bool {
        if self.emergency_reason.is_some() {
            return false;
        }
        self.emergency_reason = Some(reason.to_string());
        let now = self.clock.now();
        self.enter(SignalPhase::Emergency, now);
        true
    }

    fn reset_to_normal(&mut self) -> bool {
        if self.emergency_reason.take().is_none() {
            return false;
        }
        // Clear the intersection through yellow before the normal cycle resumes.
        let now = self.clock.now();
        self.enter(SignalPhase::Yellow, now);
        self.clearance_pending = !self.is_running;
        true
    }
}
