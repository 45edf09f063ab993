use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;

use crate::config::TimingParams;
use crate::controller::{SignalController, SignalStatus};
use crate::error::SignalError;
use crate::phase_machine::{MonotonicClock, SignalClock};

fn applied_or_warn(result: Result<bool, SignalError>) -> bool {
    result.unwrap_or_else(|e| {
        warn!("{}", e);
        false
    })
}

/// A controller plus the approach label it was registered with.
pub struct RegisteredSignal {
    pub direction: String,
    pub controller: SignalController,
}

/// All dynamic signals of one intersection.
#[derive(Resource)]
pub struct MultiSignalOrchestrator {
    signals: BTreeMap<String, RegisteredSignal>,
    clock: Arc<dyn SignalClock>,
}

impl Default for MultiSignalOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(MonotonicClock::default()))
    }
}

impl MultiSignalOrchestrator {
    /// Every controller registered later reads time from `clock`.
    pub fn new(clock: Arc<dyn SignalClock>) -> Self {
        info!("MultiSignalOrchestrator initialized");
        Self {
            signals: BTreeMap::new(),
            clock,
        }
    }

    /// Create a fresh controller under `signal_id`.
    ///
    /// An existing entry with the same id is replaced and its history lost.
    pub fn register(
        &mut self,
        signal_id: &str,
        direction: &str,
        params: TimingParams,
    ) -> &mut SignalController {
        let controller = SignalController::with_clock(signal_id, params, Arc::clone(&self.clock));
        let entry = RegisteredSignal {
            direction: direction.to_string(),
            controller,
        };
        let slot = match self.signals.entry(signal_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                warn!(
                    "Dynamic signal {} re-registered; previous state discarded",
                    signal_id
                );
                occupied.insert(entry);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(entry),
        };
        info!("Dynamic signal registered: {} ({})", signal_id, direction);
        &mut slot.controller
    }

    /// Remove a signal. Returns `false` when it was not registered.
    pub fn unregister(&mut self, signal_id: &str) -> bool {
        let removed = self.signals.remove(signal_id).is_some();
        if removed {
            info!("Dynamic signal unregistered: {}", signal_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.signals.keys().map(String::as_str)
    }

    pub fn contains(&self, signal_id: &str) -> bool {
        self.signals.contains_key(signal_id)
    }

    pub fn get(&self, signal_id: &str) -> Option<&RegisteredSignal> {
        self.signals.get(signal_id)
    }

    pub fn controller(&self, signal_id: &str) -> Option<&SignalController> {
        self.signals.get(signal_id).map(|s| &s.controller)
    }

    pub fn controller_mut(&mut self, signal_id: &str) -> Option<&mut SignalController> {
        self.signals.get_mut(signal_id).map(|s| &mut s.controller)
    }

    fn require(&mut self, signal_id: &str) -> Result<&mut SignalController, SignalError> {
        self.controller_mut(signal_id)
            .ok_or_else(|| SignalError::UnknownSignal(signal_id.to_string()))
    }

    pub fn start_all(&mut self) {
        for entry in self.signals.values_mut() {
            entry.controller.start();
        }
        info!("Started {} dynamic signals", self.signals.len());
    }

    pub fn stop_all(&mut self) {
        for entry in self.signals.values_mut() {
            entry.controller.stop();
        }
        info!("Stopped {} dynamic signals", self.signals.len());
    }

    /// Tick every phase machine once.
    pub fn update(&mut self) {
        for entry in self.signals.values_mut() {
            entry.controller.update();
        }
    }

    /// Route a vehicle count to one signal. `false` when nothing was applied
    /// or the id is unknown.
    pub fn update_vehicle_count(&mut self, signal_id: &str, vehicle_count: i64) -> bool {
        applied_or_warn(self.update_vehicle_count_checked(signal_id, vehicle_count))
    }

    pub fn update_vehicle_count_checked(
        &mut self,
        signal_id: &str,
        vehicle_count: i64,
    ) -> Result<bool, SignalError> {
        Ok(self.require(signal_id)?.update_vehicle_count(vehicle_count))
    }

    pub fn activate_emergency(&mut self, signal_id: &str, reason: &str) -> bool {
        applied_or_warn(self.activate_emergency_checked(signal_id, reason))
    }

    pub fn activate_emergency_checked(
        &mut self,
        signal_id: &str,
        reason: &str,
    ) -> Result<bool, SignalError> {
        Ok(self.require(signal_id)?.activate_emergency(reason))
    }

    pub fn reset_emergency(&mut self, signal_id: &str) -> bool {
        applied_or_warn(self.reset_emergency_checked(signal_id))
    }

    pub fn reset_emergency_checked(&mut self, signal_id: &str) -> Result<bool, SignalError> {
        Ok(self.require(signal_id)?.reset_to_normal())
    }

    pub fn get_signal_status(&self, signal_id: &str) -> Option<SignalStatus> {
        self.controller(signal_id).map(SignalController::get_status)
    }

    pub fn get_all_signals_status(&self) -> BTreeMap<String, SignalStatus> {
        self.signals
            .iter()
            .map(|(id, entry)| (id.clone(), entry.controller.get_status()))
            .collect()
    }
}
