//! Command-line arguments for the harness.
//!
//! ```text
//! traffic-signals [CONFIG.json] [--ticks N] [--seed N] [--report-every N]
//!                 [--random] [--emergency TICK:SIGNAL_ID]
//! ```

use std::fmt;
use std::str::FromStr;

use clap::Parser;

/// Emergency preemption requested for one signal at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyAt {
    pub tick: u32,
    pub signal_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEmergency(String);

impl fmt::Display for InvalidEmergency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected TICK:SIGNAL_ID, got '{}'", self.0)
    }
}

impl std::error::Error for InvalidEmergency {}

impl FromStr for EmergencyAt {
    type Err = InvalidEmergency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidEmergency(s.to_string());
        let (tick, signal_id) = s.split_once(':').ok_or_else(invalid)?;
        if signal_id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            tick: tick.parse().map_err(|_| invalid())?,
            signal_id: signal_id.to_string(),
        })
    }
}

/// Headless traffic signal timing harness.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "traffic-signals", version, long_about = None)]
pub struct HarnessOptions {
    /// JSON network configuration. Built-in defaults when omitted.
    #[arg(value_name = "CONFIG")]
    pub config_path: Option<String>,

    /// Fixed-update ticks to simulate.
    #[arg(long, default_value_t = 480)]
    pub ticks: u32,

    /// Seed for the synthetic vehicle-count feed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Counts are reported, and status printed, every this many ticks.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    pub report_every: u32,

    /// Uniform random counts instead of the rush-hour sequence.
    #[arg(long, default_value_t = false)]
    pub random: bool,

    /// Activate an emergency on a signal at the given tick.
    #[arg(long, value_name = "TICK:SIGNAL_ID")]
    pub emergency: Option<EmergencyAt>,
}
