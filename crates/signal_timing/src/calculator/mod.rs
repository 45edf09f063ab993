//! Congestion-driven green timing for one lane or signal.
//!
//! Composes [`crate::congestion::classify`], [`crate::smoothing::smooth_green`]
//! and [`crate::cycle::allocate_cycle`], and keeps a short rolling history of
//! applied greens and vehicle counts for smoothing and statistics.

mod timing;
mod types;


pub use timing::{clamp_vehicle_count, TimingCalculator};
pub use types::{TimingSnapshot, TimingStatistics};
