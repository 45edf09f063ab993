//! Rate limiting of successive green durations.
//!
//! A suggestion may move at most `max_step` seconds away from the previously
//! applied green per update, so a sudden demand swing is spread over several
//! cycles instead of jumping the phase length in one go.

/// Damp `suggested` towards it from `previous`.
///
/// Without a previous value the suggestion passes through unchanged.
pub fn smooth_green(suggested: u32, previous: Option<u32>, max_step: u32) -> u32 {
    let Some(prev) = previous else {
        return suggested;
    };

    if suggested.abs_diff(prev) <= max_step {
        suggested
    } else if suggested > prev {
        prev.saturating_add(max_step)
    } else {
        prev.saturating_sub(max_step)
    }
}
