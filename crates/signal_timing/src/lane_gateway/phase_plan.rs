use std::collections::BTreeMap;

use crate::config::DEFAULT_PHASE_GREEN;
use crate::error::SignalError;

use super::lanes::{Lane, PhaseSlot};

/// Destination for per-phase green durations.
///
/// The gateway writes only through this trait, so a hardware controller can
/// stand in for [`IntersectionPhasePlan`].
pub trait PhaseTimingSink: Send + Sync + 'static {
    fn phase_green(&self, slot: PhaseSlot) -> Option<u32>;

    fn set_phase_green(&mut self, slot: PhaseSlot, green: u32) -> Result<(), SignalError>;

    /// Every slot with its current green, ordered by slot number.
    fn phase_timings(&self) -> BTreeMap<PhaseSlot, u32>;
}

/// In-memory phase table: one green duration per lane slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionPhasePlan {
    greens: BTreeMap<PhaseSlot, u32>,
}

impl Default for IntersectionPhasePlan {
    fn default() -> Self {
        Self {
            greens: Lane::ALL
                .into_iter()
                .map(|lane| (lane.phase_slot(), DEFAULT_PHASE_GREEN))
                .collect(),
        }
    }
}

impl PhaseTimingSink for IntersectionPhasePlan {
    fn phase_green(&self, slot: PhaseSlot) -> Option<u32> {
        self.greens.get(&slot).copied()
    }

    fn set_phase_green(&mut self, slot: PhaseSlot, green: u32) -> Result<(), SignalError> {
        if green == 0 {
            return Err(SignalError::InvalidDuration {
                field: "green",
                value: green,
            });
        }
        match self.greens.get_mut(&slot) {
            Some(current) => {
                *current = green;
                Ok(())
            }
            None => Err(SignalError::UnknownPhaseSlot(slot)),
        }
    }

    fn phase_timings(&self) -> BTreeMap<PhaseSlot, u32> {
        self.greens.clone()
    }
}
