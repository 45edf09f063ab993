use serde::{Deserialize, Serialize};

use crate::calculator::TimingSnapshot;
use crate::error::SignalError;

/// Phase currently shown by a signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalPhase {
    Green,
    Yellow,
    #[default]
    Red,
    /// Priority green held for an emergency vehicle.
    Emergency,
}

impl SignalPhase {
    /// Normal-cycle successor. Emergency has none; it only ends through
    /// `reset_to_normal`.
    pub fn next(self) -> SignalPhase {
        match self {
            SignalPhase::Green => SignalPhase::Yellow,
            SignalPhase::Yellow => SignalPhase::Red,
            SignalPhase::Red => SignalPhase::Green,
            SignalPhase::Emergency => SignalPhase::Emergency,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalPhase::Green => "GREEN",
            SignalPhase::Yellow => "YELLOW",
            SignalPhase::Red => "RED",
            SignalPhase::Emergency => "EMERGENCY",
        }
    }
}

/// Green/yellow/red durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

impl PhaseDurations {
    pub fn new(green: u32, yellow: u32, red: u32) -> Self {
        Self { green, yellow, red }
    }

    /// Duration of a normal-cycle phase. Emergency has no fixed length.
    pub fn of(&self, phase: SignalPhase) -> Option<u32> {
        match phase {
            SignalPhase::Green => Some(self.green),
            SignalPhase::Yellow => Some(self.yellow),
            SignalPhase::Red => Some(self.red),
            SignalPhase::Emergency => None,
        }
    }
}

impl From<&TimingSnapshot> for PhaseDurations {
    fn from(snapshot: &TimingSnapshot) -> Self {
        Self {
            green: snapshot.green_duration,
            yellow: snapshot.yellow_duration,
            red: snapshot.red_duration,
        }
    }
}

/// Read-only view of a phase machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseStateInfo {
    pub current_state: SignalPhase,
    pub is_running: bool,
    /// Seconds left in the current phase as of the last tick.
    pub time_remaining: f32,
    pub emergency_active: bool,
    pub emergency_reason: Option<String>,
}

/// Operations a signal controller needs from the machine it drives.
pub trait PhaseMachine: Send + Sync + 'static {
    fn start(&mut self);
    fn stop(&mut self);

    /// Advance timers and fire at most one transition. Returns the new phase
    /// when a transition happened.
    fn update(&mut self) -> Option<SignalPhase>;

    fn state_info(&self) -> PhaseStateInfo;

    /// Whether the machine is timing its current phase (started and not
    /// stopped since).
    fn has_started_timing(&self) -> bool;

    fn durations(&self) -> PhaseDurations;

    /// Replace the phase durations. The new values are consulted at the next
    /// transition check.
    fn set_durations(&mut self, durations: PhaseDurations) -> Result<(), SignalError>;

    /// Enter emergency preemption. Returns `false` (and changes nothing) when
    /// already active.
    fn activate_emergency(&mut self, reason: &str) -> bool;

    /// Leave emergency preemption. Returns `false` when none was active.
    fn reset_to_normal(&mut self) -> bool;
}
