use std::sync::Arc;

use crate::calculator::TimingCalculator;
use crate::config::TimingParams;
use crate::controller::SignalController;
use crate::phase_machine::{SignalPhase, TickClock};

fn scenario_params(smoothing_enabled: bool) -> TimingParams {
    TimingParams {
        base_cycle_time: 90,
        min_green: 15,
        max_green: 60,
        yellow_duration: 4,
        smoothing_enabled,
        max_step: 5,
        ..Default::default()
    }
}

// ===========================================================================
// Scenario A: smoothing off
// ===========================================================================

#[test]
fn scenario_a_unsmoothed_table_lookup() {
    let mut calc = TimingCalculator::new(scenario_params(false));

    let t = calc.calculate(0);
    assert_eq!((t.green_duration, t.red_duration), (15, 71));
    let t = calc.calculate(12);
    assert_eq!((t.green_duration, t.red_duration), (35, 51));
    let t = calc.calculate(40);
    assert_eq!(
        (t.green_duration, t.red_duration),
        (60, 26),
        "critical suggestion clamps to max_green"
    );
}

// ===========================================================================
// Scenario B: smoothing on
// ===========================================================================

#[test]
fn scenario_b_smoothed_ramp() {
    let mut calc = TimingCalculator::new(scenario_params(true));
    assert_eq!(calc.calculate(0).green_duration, 15);
    let greens: Vec<u32> = (0..4).map(|_| calc.calculate(40).green_duration).collect();
    assert_eq!(greens, vec![20, 25, 30, 35], "suggested 60 must be damped");
}

#[test]
fn scenario_b_through_controller() {
    let clock = TickClock::new();
    let mut controller =
        SignalController::with_clock("signal_b", scenario_params(true), Arc::new(clock.clone()));
    controller.start();
    let applied: Vec<u32> = (0..4)
        .map(|_| {
            controller.update_vehicle_count(40);
            controller.get_status().green_duration
        })
        .collect();
    assert_eq!(applied, vec![20, 25, 30, 35]);
}

// ===========================================================================
// Scenario C: emergency preemption
// ===========================================================================

#[test]
fn scenario_c_emergency_mid_cycle() {
    let clock = TickClock::new();
    let mut controller =
        SignalController::with_clock("signal_c", scenario_params(false), Arc::new(clock.clone()));
    controller.start();
    controller.update_vehicle_count(12);
    clock.advance_secs(10);
    controller.update();
    let held = controller.get_status().green_duration;
    assert_eq!(held, 35);

    assert!(controller.activate_emergency("Ambulance detected"));
    for count in [40, 0, 25, 3, 40] {
        controller.update_vehicle_count(count);
        clock.advance_secs(30);
        controller.update();
        let status = controller.get_status();
        assert_eq!(status.green_duration, held, "count {count} applied during emergency");
        assert_eq!(status.signal_state, SignalPhase::Emergency);
        assert_eq!(
            controller.calculator().last_snapshot().map(|s| i64::from(s.vehicle_count)),
            Some(count),
            "snapshots are still computed"
        );
    }
    let updates_before = controller.timing_updates_count();

    assert!(controller.reset_to_normal());
    // 35s is still in force: nothing to apply.
    assert!(!controller.update_vehicle_count(12));
    // Next differing snapshot applies normally.
    assert!(controller.update_vehicle_count(0));
    assert_eq!(controller.get_status().green_duration, 15);
    assert_eq!(controller.timing_updates_count(), updates_before + 1);
}

#[test]
fn emergency_resumes_cycle_through_yellow() {
    let clock = TickClock::new();
    let mut controller =
        SignalController::with_clock("signal_c", scenario_params(false), Arc::new(clock.clone()));
    controller.start();
    controller.activate_emergency("Fire engine");
    clock.advance_secs(120);
    assert_eq!(controller.update(), None, "emergency has no timeout");

    controller.reset_to_normal();
    assert_eq!(controller.get_status().signal_state, SignalPhase::Yellow);
    clock.advance_secs(4);
    assert_eq!(controller.update(), Some(SignalPhase::Red));
}
