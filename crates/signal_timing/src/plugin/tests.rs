//! Unit tests for plugin wiring.

use bevy::prelude::*;

use crate::config::{SignalNetworkConfig, SignalSpec};
use crate::lane_gateway::{Lane, LaneSelectionGateway};
use crate::orchestrator::MultiSignalOrchestrator;
use crate::phase_machine::SignalPhase;

use super::*;

fn app_with(config: SignalNetworkConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(config);
    app.add_plugins(SignalTimingPlugin);
    // First update runs Startup systems.
    app.update();
    app
}

fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

#[test]
fn test_plugin_registers_configured_signals() {
    let config = SignalNetworkConfig {
        signals: vec![
            SignalSpec::new("signal_a", "north"),
            SignalSpec::new("signal_b", "south"),
            SignalSpec::new("signal_c", "east"),
        ],
        selected_lane: None,
        ..Default::default()
    };
    let app = app_with(config);
    let orchestrator = app.world().resource::<MultiSignalOrchestrator>();
    assert_eq!(orchestrator.len(), 3);
    assert!(
        orchestrator
            .get_all_signals_status()
            .values()
            .all(|s| s.is_running),
        "Startup should start every registered signal"
    );
    assert_eq!(
        app.world().resource::<LaneSelectionGateway>().selected_lane(),
        None
    );
}

#[test]
fn test_plugin_selects_configured_lane() {
    let app = app_with(SignalNetworkConfig::default());
    assert_eq!(
        app.world().resource::<LaneSelectionGateway>().selected_lane(),
        Some(Lane::East)
    );
}

#[test]
fn test_clock_advances_one_interval_per_tick() {
    let mut app = app_with(SignalNetworkConfig::default());
    let before = app.world().resource::<SignalClockHandle>().0.now();
    tick(&mut app, 4);
    let after = app.world().resource::<SignalClockHandle>().0.now();
    assert_eq!((after - before).as_millis(), 1000);
}

#[test]
fn test_signals_cycle_on_fixed_update() {
    let mut app = app_with(SignalNetworkConfig::default());
    // 250 ms per tick: 15 s of green is 60 ticks.
    tick(&mut app, 59);
    let status = app
        .world()
        .resource::<MultiSignalOrchestrator>()
        .get_signal_status("signal_ns")
        .expect("default signal");
    assert_eq!(status.signal_state, SignalPhase::Green);

    tick(&mut app, 1);
    let status = app
        .world()
        .resource::<MultiSignalOrchestrator>()
        .get_signal_status("signal_ns")
        .expect("default signal");
    assert_eq!(status.signal_state, SignalPhase::Yellow);
}
