// ---------------------------------------------------------------------------
// SignalError: structured failures for signal timing operations
// ---------------------------------------------------------------------------

use std::fmt;

use crate::lane_gateway::PhaseSlot;

/// Broad category of a [`SignalError`].
///
/// Neither category is fatal: the caller reports the failure and keeps
/// serving every other lane and signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request named something that does not exist or is out of range.
    Configuration,
    /// The request is valid but arrived in the wrong state.
    State,
}

/// Errors reported by the lane gateway, the orchestrator's checked
/// operations, and phase-machine duration writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Lane name outside the fixed north/south/east/west set.
    UnknownLane(String),
    /// No controller is registered under this signal id.
    UnknownSignal(String),
    /// No calculator is registered under this zone id.
    UnknownZone(String),
    /// The phase plan has no entry for this slot.
    UnknownPhaseSlot(PhaseSlot),
    /// A duration write was rejected by the phase machine.
    InvalidDuration { field: &'static str, value: u32 },
    /// A vehicle count arrived before any lane was selected.
    NoLaneSelected,
}

impl SignalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignalError::NoLaneSelected => ErrorKind::State,
            SignalError::UnknownLane(_)
            | SignalError::UnknownSignal(_)
            | SignalError::UnknownZone(_)
            | SignalError::UnknownPhaseSlot(_)
            | SignalError::InvalidDuration { .. } => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::UnknownLane(lane) => write!(f, "Invalid lane: {lane}"),
            SignalError::UnknownSignal(id) => write!(f, "Signal {id} not found"),
            SignalError::UnknownZone(id) => write!(f, "Zone {id} not found"),
            SignalError::UnknownPhaseSlot(slot) => {
                write!(f, "Phase slot {slot} is not part of the phase plan")
            }
            SignalError::InvalidDuration { field, value } => {
                write!(f, "Invalid {field} duration: {value}s")
            }
            SignalError::NoLaneSelected => write!(f, "No lane selected"),
        }
    }
}

impl std::error::Error for SignalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_lane_display() {
        let err = SignalError::UnknownLane("northeast".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("Invalid lane"), "got: {msg}");
        assert!(msg.contains("northeast"), "got: {msg}");
    }

    #[test]
    fn test_no_lane_selected_display() {
        let msg = format!("{}", SignalError::NoLaneSelected);
        assert_eq!(msg, "No lane selected");
    }

    #[test]
    fn test_invalid_duration_display() {
        let err = SignalError::InvalidDuration {
            field: "green",
            value: 0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("green"), "got: {msg}");
        assert!(msg.contains("0s"), "got: {msg}");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(SignalError::NoLaneSelected.kind(), ErrorKind::State);
        assert_eq!(
            SignalError::UnknownSignal("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            SignalError::UnknownLane("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            SignalError::UnknownPhaseSlot(PhaseSlot(2)).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_signal_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(SignalError::NoLaneSelected);
        assert!(err.source().is_none());
    }
}
