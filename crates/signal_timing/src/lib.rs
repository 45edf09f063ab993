//! Congestion-driven green-phase timing for traffic signals.
//!
//! Vehicle counts are classified into congestion levels, damped against the
//! previous green, clamped to the configured bounds and turned into a
//! green/yellow/red split ([`calculator`]). A [`controller::SignalController`]
//! applies that split to a phase machine while respecting emergency
//! preemption; [`orchestrator`] keeps many of them by id, and
//! [`lane_gateway`] restricts dynamic timing to one selected lane of an
//! intersection. [`SignalTimingPlugin`] drives everything from Bevy's
//! `FixedUpdate`.

pub mod calculator;
pub mod config;
pub mod congestion;
pub mod controller;
pub mod count_feed;
pub mod cycle;
pub mod error;
pub mod history;
pub mod lane_gateway;
pub mod orchestrator;
pub mod phase_machine;
pub mod plugin;
pub mod smoothing;
pub mod zones;


pub use calculator::{TimingCalculator, TimingSnapshot, TimingStatistics};
pub use config::{SignalNetworkConfig, SignalSpec, TimingParams};
pub use congestion::CongestionLevel;
pub use controller::{SignalController, SignalStatus};
pub use error::{ErrorKind, SignalError};
pub use lane_gateway::{Lane, LaneSelectionGateway};
pub use orchestrator::MultiSignalOrchestrator;
pub use phase_machine::{PhaseMachine, SignalPhase};
pub use plugin::{SignalTimingPlugin, SignalTimingSet};
pub use zones::MultiZoneTiming;
