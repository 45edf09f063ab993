//! Partition of a fixed cycle into green, yellow and red.

use serde::{Deserialize, Serialize};

/// Phase durations of one cycle, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleAllocation {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

impl CycleAllocation {
    /// Seconds of one full cycle as allocated.
    ///
    /// Exceeds the configured base cycle whenever red had to be floored.
    pub fn effective_cycle(&self) -> u32 {
        self.green.saturating_add(self.yellow).saturating_add(self.red)
    }
}

/// Give red whatever the cycle has left after green and yellow, but never
/// less than `min_red`.
///
/// `green` must already be clamped to the calculator's bounds. When
/// `green + yellow` leaves less than `min_red`, red is forced to the floor and
/// the effective cycle grows past `base_cycle_time`. Green is not shortened.
pub fn allocate_cycle(green: u32, yellow: u32, base_cycle_time: u32, min_red: u32) -> CycleAllocation {
    let remaining = base_cycle_time.saturating_sub(green.saturating_add(yellow));
    CycleAllocation {
        green,
        yellow,
        red: remaining.max(min_red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_takes_remaining_cycle() {
        let a = allocate_cycle(15, 4, 90, 10);
        assert_eq!(a.red, 71);
        assert_eq!(a.effective_cycle(), 90);

        let a = allocate_cycle(35, 4, 90, 10);
        assert_eq!(a.red, 51);

        let a = allocate_cycle(60, 4, 90, 10);
        assert_eq!(a.red, 26);
    }

    #[test]
    fn test_red_floored_when_cycle_exhausted() {
        // 60 + 4 leaves -4 of a 60s cycle: red is forced to the floor.
        let a = allocate_cycle(60, 4, 60, 10);
        assert_eq!(a.red, 10);
        assert_eq!(a.effective_cycle(), 74);
        assert!(a.effective_cycle() > 60);
    }

    #[test]
    fn test_red_exactly_at_floor() {
        let a = allocate_cycle(36, 4, 50, 10);
        assert_eq!(a.red, 10);
        assert_eq!(a.effective_cycle(), 50);
    }

    #[test]
    fn test_effective_cycle_saturates() {
        let a = allocate_cycle(60, u32::MAX, 90, 10);
        assert_eq!(a.red, 10);
        assert_eq!(a.effective_cycle(), u32::MAX);
    }

    #[test]
    fn test_red_never_below_floor() {
        for green in 0..=120 {
            let a = allocate_cycle(green, 4, 90, 10);
            assert!(a.red >= 10, "green {green} gave red {}", a.red);
            assert_eq!(a.green, green);
        }
    }
}
