//! Bridge between a timing calculator and the phase machine it drives.
//!
//! Every vehicle count produces a fresh [`crate::calculator::TimingSnapshot`];
//! only some of them are pushed into the machine. See
//! [`SignalController::update_vehicle_count`] for the gating rules.

mod signal_controller;
mod types;


pub use signal_controller::SignalController;
pub use types::{SignalStatus, TimingCallback, TimingChangeRecord};
