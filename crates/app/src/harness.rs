//! Headless run loop: a minimal Bevy app with the signal timing plugin,
//! fed from a synthetic count stream, reporting JSON lines on stdout.
//!
//! Logs go to stderr (via `LogPlugin`) so stdout stays machine-readable.

use std::collections::BTreeMap;
use std::io::Write;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use serde::Serialize;

use signal_timing::count_feed::{CountPattern, VehicleCountFeed};
use signal_timing::lane_gateway::{LaneGatewayStatistics, LaneGatewayStatus};
use signal_timing::plugin::{EmergencyCommand, VehicleCountReport};
use signal_timing::{
    LaneSelectionGateway, MultiSignalOrchestrator, SignalNetworkConfig, SignalStatus,
    SignalTimingPlugin,
};

use crate::cli::HarnessOptions;

/// Emergency preemption lasts this many ticks in the demo.
const EMERGENCY_TICKS: u32 = 40;

#[derive(Serialize)]
struct Report<'a> {
    tick: u32,
    signals: BTreeMap<String, SignalStatus>,
    lane: &'a LaneGatewayStatus,
}

#[derive(Serialize)]
struct FinalReport {
    ticks: u32,
    signals: BTreeMap<String, SignalStatus>,
    lane: LaneGatewayStatus,
    lane_statistics: LaneGatewayStatistics,
}

fn build_app(config: SignalNetworkConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(LogPlugin::default());
    app.insert_resource(config);
    app.add_plugins(SignalTimingPlugin);
    // Initial update so Startup systems start the signals and select the lane.
    app.update();
    app
}

pub fn run(options: HarnessOptions, config: SignalNetworkConfig) -> std::io::Result<()> {
    let signal_ids: Vec<String> = config.signals.iter().map(|s| s.id.clone()).collect();
    let mut app = build_app(config);

    let pattern = if options.random {
        CountPattern::Uniform { max: 40 }
    } else {
        CountPattern::rush_hour()
    };
    let mut feed = VehicleCountFeed::from_seed_u64(options.seed, pattern);

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    for tick in 1..=options.ticks {
        if tick % options.report_every == 0 {
            for id in &signal_ids {
                let count = i64::from(feed.next_count());
                app.world_mut()
                    .send_event(VehicleCountReport::signal(id.clone(), count));
            }
            let lane_count = i64::from(feed.next_count());
            app.world_mut()
                .send_event(VehicleCountReport::selected_lane(lane_count));
        }

        if let Some(emergency) = &options.emergency {
            if tick == emergency.tick {
                app.world_mut().send_event(EmergencyCommand::activate(
                    emergency.signal_id.clone(),
                    "Ambulance detected",
                ));
            } else if tick == emergency.tick.saturating_add(EMERGENCY_TICKS) {
                app.world_mut()
                    .send_event(EmergencyCommand::reset(emergency.signal_id.clone()));
            }
        }

        app.world_mut().run_schedule(FixedUpdate);

        if tick % options.report_every == 0 {
            let lane = app.world().resource::<LaneSelectionGateway>().status();
            let report = Report {
                tick,
                signals: app
                    .world()
                    .resource::<MultiSignalOrchestrator>()
                    .get_all_signals_status(),
                lane: &lane,
            };
            writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
        }
    }

    let gateway = app.world().resource::<LaneSelectionGateway>();
    let summary = FinalReport {
        ticks: options.ticks,
        signals: app
            .world()
            .resource::<MultiSignalOrchestrator>()
            .get_all_signals_status(),
        lane: gateway.status(),
        lane_statistics: gateway.statistics(),
    };
    writeln!(stdout, "{}", serde_json::to_string_pretty(&summary)?)?;
    stdout.flush()
}
