//! Single-lane dynamic timing over a four-approach intersection.
//!
//! Each [`Lane`] is statically bound to one [`DetectionZone`] and one
//! [`PhaseSlot`]: north → `PHASE_5`, south → `PHASE_1`, east → `PHASE_7`,
//! west → `PHASE_3`. [`LaneSelectionGateway`] runs a timing calculator for
//! the selected lane and writes its green into that lane's slot of a
//! [`PhaseTimingSink`].

mod gateway;
mod lanes;
mod phase_plan;
mod types;


pub use gateway::LaneSelectionGateway;
pub use lanes::{DetectionZone, Lane, LaneBinding, PhaseSlot};
pub use phase_plan::{IntersectionPhasePlan, PhaseTimingSink};
pub use types::{
    CountSample, LaneGatewayStatistics, LaneGatewayStatus, LaneSelection, LaneTimingUpdate,
};
