//! Unit tests for the signal registry.

use std::sync::Arc;

use crate::config::TimingParams;
use crate::error::SignalError;
use crate::phase_machine::{SignalPhase, TickClock};

use super::*;

fn orchestrator(clock: &TickClock) -> MultiSignalOrchestrator {
    let mut o = MultiSignalOrchestrator::new(Arc::new(clock.clone()));
    o.register("signal_ns", "north-south", TimingParams::default());
    o.register("signal_ew", "east-west", TimingParams::default());
    o
}

#[test]
fn test_register_and_lookup() {
    let clock = TickClock::new();
    let o = orchestrator(&clock);
    assert_eq!(o.len(), 2);
    assert!(!o.is_empty());
    assert_eq!(o.ids().collect::<Vec<_>>(), vec!["signal_ew", "signal_ns"]);
    assert_eq!(
        o.get("signal_ns").map(|s| s.direction.as_str()),
        Some("north-south")
    );
    assert!(o.controller("signal_missing").is_none());
}

#[test]
fn test_register_returns_controller_for_setup() {
    let clock = TickClock::new();
    let mut o = MultiSignalOrchestrator::new(Arc::new(clock.clone()));
    o.register("signal_n", "north", TimingParams::with_bounds(120, 20, 80))
        .start();
    let status = o.get_signal_status("signal_n").expect("registered");
    assert!(status.is_running);
    assert_eq!(status.green_duration, 20);
}

#[test]
fn test_reregister_discards_state() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    o.start_all();
    assert!(o.update_vehicle_count("signal_ns", 12));
    assert_eq!(
        o.get_signal_status("signal_ns").map(|s| s.timing_updates_count),
        Some(1)
    );

    o.register("signal_ns", "north-south", TimingParams::default());
    let status = o.get_signal_status("signal_ns").expect("re-registered");
    assert_eq!(status.timing_updates_count, 0);
    assert_eq!(status.current_vehicle_count, 0);
    assert!(!status.is_running, "replacement controller starts stopped");
    assert_eq!(o.len(), 2);
}

#[test]
fn test_unknown_id_returns_false() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    o.start_all();
    assert!(!o.update_vehicle_count("signal_x", 40));
    assert!(!o.activate_emergency("signal_x", "Ambulance detected"));
    assert!(!o.reset_emergency("signal_x"));
    assert!(o.get_signal_status("signal_x").is_none());
}

#[test]
fn test_checked_variants_report_unknown_signal() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    assert_eq!(
        o.update_vehicle_count_checked("signal_x", 3),
        Err(SignalError::UnknownSignal("signal_x".to_string()))
    );
    assert_eq!(o.activate_emergency_checked("signal_ns", "test"), Ok(true));
    assert_eq!(o.reset_emergency_checked("signal_ns"), Ok(true));
    assert_eq!(o.reset_emergency_checked("signal_ns"), Ok(false));
}

#[test]
fn test_start_stop_all() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    o.start_all();
    assert!(o.get_all_signals_status().values().all(|s| s.is_running));
    o.stop_all();
    assert!(o.get_all_signals_status().values().all(|s| !s.is_running));
}

#[test]
fn test_update_ticks_every_signal() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    o.start_all();
    clock.advance_secs(15);
    o.update();
    for status in o.get_all_signals_status().values() {
        assert_eq!(status.signal_state, SignalPhase::Yellow, "{}", status.signal_id);
    }
}

#[test]
fn test_signals_are_independent() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    o.start_all();
    assert!(o.activate_emergency("signal_ns", "Ambulance detected"));

    assert!(!o.update_vehicle_count("signal_ns", 3));
    assert!(o.update_vehicle_count("signal_ew", 3));

    let all = o.get_all_signals_status();
    assert_eq!(all["signal_ns"].green_duration, 15);
    assert_eq!(all["signal_ew"].green_duration, 20);
    assert!(all["signal_ns"].emergency_active);
    assert!(!all["signal_ew"].emergency_active);
}

#[test]
fn test_unregister() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    assert!(o.unregister("signal_ew"));
    assert!(!o.unregister("signal_ew"));
    assert!(!o.contains("signal_ew"));
    assert_eq!(o.len(), 1);
}

#[test]
fn test_status_reads_idempotent() {
    let clock = TickClock::new();
    let mut o = orchestrator(&clock);
    o.start_all();
    o.update_vehicle_count("signal_ns", 22);
    clock.advance_secs(2);
    o.update();
    assert_eq!(o.get_all_signals_status(), o.get_all_signals_status());
}
