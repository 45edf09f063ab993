//! Registry of signal controllers keyed by signal id.
//!
//! Broadcast operations (`start_all`, `stop_all`, `update`) touch every entry
//! independently; single-target operations return `false` for unknown ids so
//! callers can keep serving the remaining signals.

mod registry;

#[cfg(test)]
mod tests;

pub use registry::{MultiSignalOrchestrator, RegisteredSignal};
