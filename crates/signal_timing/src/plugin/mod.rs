//! Bevy integration: the plugin is the external scheduling loop.
//!
//! Each `FixedUpdate` advances the shared [`TickClock`] by one tick interval,
//! applies emergency commands and count reports received since the last tick,
//! then ticks every registered phase machine. The ordering is fixed by
//! [`SignalTimingSet`]:
//!
//! ```text
//! Clock  →  Commands  →  Counts  →  Tick
//! ```

use std::sync::Arc;

use bevy::prelude::*;

use crate::config::SignalNetworkConfig;
use crate::lane_gateway::LaneSelectionGateway;
use crate::orchestrator::MultiSignalOrchestrator;
use crate::phase_machine::{SignalClock, TickClock};

mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use events::{
    CountTarget, EmergencyAction, EmergencyCommand, LaneTimingUpdated, SignalTimingChanged,
    VehicleCountReport,
};
pub use systems::{
    advance_signal_clock, apply_vehicle_counts, handle_emergency_commands,
    select_configured_lane, start_registered_signals, tick_signals,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignalTimingSet {
    /// Advance signal time.
    Clock,
    /// Emergency activation and reset.
    Commands,
    /// Vehicle count reports.
    Counts,
    /// Phase machine updates.
    Tick,
}

/// Clock shared by every phase machine the plugin creates.
#[derive(Resource, Debug, Clone, Default)]
pub struct SignalClockHandle(pub TickClock);

impl SignalClockHandle {
    pub fn shared(&self) -> Arc<dyn SignalClock> {
        Arc::new(self.0.clone())
    }
}

/// Registers the signals from [`SignalNetworkConfig`] (inserted beforehand,
/// or the default two-signal intersection) and drives them from
/// `FixedUpdate`.
pub struct SignalTimingPlugin;

impl Plugin for SignalTimingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SignalNetworkConfig>()
            .init_resource::<SignalClockHandle>()
            .init_resource::<LaneSelectionGateway>();

        let config = app.world().resource::<SignalNetworkConfig>().clone();
        if !app.world().contains_resource::<MultiSignalOrchestrator>() {
            let clock = app.world().resource::<SignalClockHandle>().shared();
            let mut orchestrator = MultiSignalOrchestrator::new(clock);
            for spec in &config.signals {
                orchestrator.register(&spec.id, &spec.direction, spec.params);
            }
            app.insert_resource(orchestrator);
        }

        app.insert_resource(Time::<Fixed>::from_duration(config.tick_interval()))
            .add_event::<VehicleCountReport>()
            .add_event::<EmergencyCommand>()
            .add_event::<SignalTimingChanged>()
            .add_event::<LaneTimingUpdated>()
            .configure_sets(
                FixedUpdate,
                (
                    SignalTimingSet::Clock,
                    SignalTimingSet::Commands,
                    SignalTimingSet::Counts,
                    SignalTimingSet::Tick,
                )
                    .chain(),
            )
            .add_systems(Startup, (start_registered_signals, select_configured_lane))
            .add_systems(
                FixedUpdate,
                (
                    advance_signal_clock.in_set(SignalTimingSet::Clock),
                    handle_emergency_commands.in_set(SignalTimingSet::Commands),
                    apply_vehicle_counts.in_set(SignalTimingSet::Counts),
                    tick_signals.in_set(SignalTimingSet::Tick),
                ),
            );
    }
}
