use bevy::prelude::*;

use crate::config::SignalNetworkConfig;
use crate::lane_gateway::LaneSelectionGateway;
use crate::orchestrator::MultiSignalOrchestrator;

use super::events::{
    CountTarget, EmergencyAction, EmergencyCommand, LaneTimingUpdated, SignalTimingChanged,
    VehicleCountReport,
};
use super::SignalClockHandle;

pub fn start_registered_signals(mut orchestrator: ResMut<MultiSignalOrchestrator>) {
    orchestrator.start_all();
}

pub fn select_configured_lane(
    config: Res<SignalNetworkConfig>,
    mut gateway: ResMut<LaneSelectionGateway>,
) {
    if let Some(lane) = config.selected_lane {
        gateway.select_lane(lane);
    }
}

/// Moves signal time forward by one tick interval per fixed update.
pub fn advance_signal_clock(config: Res<SignalNetworkConfig>, clock: Res<SignalClockHandle>) {
    clock.0.advance(config.tick_interval());
}

pub fn handle_emergency_commands(
    mut commands: EventReader<EmergencyCommand>,
    mut orchestrator: ResMut<MultiSignalOrchestrator>,
) {
    for command in commands.read() {
        let result = match &command.action {
            EmergencyAction::Activate { reason } => {
                orchestrator.activate_emergency_checked(&command.signal_id, reason)
            }
            EmergencyAction::Reset => orchestrator.reset_emergency_checked(&command.signal_id),
        };
        match result {
            Ok(true) => {}
            Ok(false) => debug!(
                "Emergency command {:?} for {} changed nothing",
                command.action, command.signal_id
            ),
            Err(e) => warn!("Emergency command skipped: {}", e),
        }
    }
}

/// Routes count reports to the orchestrator or the lane gateway and
/// announces every applied timing.
pub fn apply_vehicle_counts(
    mut reports: EventReader<VehicleCountReport>,
    mut orchestrator: ResMut<MultiSignalOrchestrator>,
    mut gateway: ResMut<LaneSelectionGateway>,
    mut signal_changes: EventWriter<SignalTimingChanged>,
    mut lane_updates: EventWriter<LaneTimingUpdated>,
) {
    for report in reports.read() {
        match &report.target {
            CountTarget::Signal(signal_id) => {
                match orchestrator.update_vehicle_count_checked(signal_id, report.count) {
                    Ok(true) => {
                        let snapshot = orchestrator
                            .controller(signal_id)
                            .and_then(|c| c.calculator().last_snapshot())
                            .cloned();
                        if let Some(snapshot) = snapshot {
                            signal_changes.send(SignalTimingChanged {
                                signal_id: signal_id.clone(),
                                snapshot,
                            });
                        }
                    }
                    Ok(false) => {}
                    Err(e) => warn!("Vehicle count report skipped: {}", e),
                }
            }
            CountTarget::SelectedLane => match gateway.update_count(report.count) {
                Ok(update) => {
                    lane_updates.send(LaneTimingUpdated {
                        lane: update.lane,
                        update,
                    });
                }
                Err(e) => warn!("Lane count report skipped: {}", e),
            },
        }
    }
}

pub fn tick_signals(mut orchestrator: ResMut<MultiSignalOrchestrator>) {
    orchestrator.update();
}
