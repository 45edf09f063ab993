//! Phase state machine driven by the signal controller.
//!
//! The controller only talks to the [`PhaseMachine`] trait: start/stop, a
//! periodic `update()` tick, state info, mutable phase durations, and
//! emergency preemption. [`SignalStateMachine`] is the stock implementation:
//! `Green -> Yellow -> Red -> Green`, plus an `Emergency` hold that lasts
//! until `reset_to_normal()`.

mod clock;
mod state_machine;
mod types;


pub use clock::{MonotonicClock, SignalClock, TickClock};
pub use state_machine::SignalStateMachine;
pub use types::{PhaseDurations, PhaseMachine, PhaseStateInfo, SignalPhase};
