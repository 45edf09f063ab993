//! Congestion classification from a lane's vehicle count.
//!
//! Five contiguous, non-overlapping buckets keyed by their lower bound:
//! - 0 vehicles: NONE, 15s green
//! - 1-5: LOW, 20s green
//! - 6-15: MODERATE, 35s green
//! - 16-30: HIGH, 50s green
//! - 31+: CRITICAL, 60s green
//!
//! The suggested greens are tuned for the default 15-60s green bounds. A
//! calculator configured with other bounds clamps the suggestion afterwards.

use serde::{Deserialize, Serialize};

/// Congestion severity, ordered from `None` (empty lane) to `Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CongestionLevel {
    #[default]
    None = 0,
    Low = 1,
    Moderate = 2,
    High = 3,
    Critical = 4,
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CongestionBucket {
    /// Smallest vehicle count that falls in this bucket.
    pub lower_bound: u32,
    pub level: CongestionLevel,
    /// Green duration suggested for this bucket, in seconds.
    pub suggested_green: u32,
}

/// Classification table, sorted by ascending lower bound.
pub const CONGESTION_BUCKETS: [CongestionBucket; 5] = [
    CongestionBucket {
        lower_bound: 0,
        level: CongestionLevel::None,
        suggested_green: 15,
    },
    CongestionBucket {
        lower_bound: 1,
        level: CongestionLevel::Low,
        suggested_green: 20,
    },
    CongestionBucket {
        lower_bound: 6,
        level: CongestionLevel::Moderate,
        suggested_green: 35,
    },
    CongestionBucket {
        lower_bound: 16,
        level: CongestionLevel::High,
        suggested_green: 50,
    },
    CongestionBucket {
        lower_bound: 31,
        level: CongestionLevel::Critical,
        suggested_green: 60,
    },
];

/// Map a vehicle count to its congestion level and suggested green.
///
/// Picks the bucket with the greatest lower bound not exceeding the count.
pub fn classify(vehicle_count: u32) -> (CongestionLevel, u32) {
    let bucket = CONGESTION_BUCKETS
        .iter()
        .rev()
        .find(|b| vehicle_count >= b.lower_bound)
        .unwrap_or(&CONGESTION_BUCKETS[0]);
    (bucket.level, bucket.suggested_green)
}

impl CongestionLevel {
    /// Congestion level for a vehicle count.
    pub fn from_vehicle_count(vehicle_count: u32) -> Self {
        classify(vehicle_count).0
    }

    /// Green duration the classification table suggests for this level.
    pub fn suggested_green(self) -> u32 {
        CONGESTION_BUCKETS[self as usize].suggested_green
    }

    /// Upper-case name, as reported in status records.
    pub fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::None => "NONE",
            CongestionLevel::Low => "LOW",
            CongestionLevel::Moderate => "MODERATE",
            CongestionLevel::High => "HIGH",
            CongestionLevel::Critical => "CRITICAL",
        }
    }

    /// Human-readable reason attached to every timing snapshot.
    pub fn reason(self) -> &'static str {
        match self {
            CongestionLevel::None => "No traffic - minimum green",
            CongestionLevel::Low => "Light traffic - short green",
            CongestionLevel::Moderate => "Moderate traffic - normal green",
            CongestionLevel::High => "Heavy traffic - extended green",
            CongestionLevel::Critical => "Very heavy traffic - maximum green",
        }
    }
}

impl std::fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bucket_edges() {
        assert_eq!(classify(0), (CongestionLevel::None, 15));
        assert_eq!(classify(1), (CongestionLevel::Low, 20));
        assert_eq!(classify(5), (CongestionLevel::Low, 20));
        assert_eq!(classify(6), (CongestionLevel::Moderate, 35));
        assert_eq!(classify(15), (CongestionLevel::Moderate, 35));
        assert_eq!(classify(16), (CongestionLevel::High, 50));
        assert_eq!(classify(30), (CongestionLevel::High, 50));
        assert_eq!(classify(31), (CongestionLevel::Critical, 60));
        assert_eq!(classify(u32::MAX), (CongestionLevel::Critical, 60));
    }

    #[test]
    fn test_buckets_are_contiguous_and_sorted() {
        assert_eq!(CONGESTION_BUCKETS[0].lower_bound, 0);
        for pair in CONGESTION_BUCKETS.windows(2) {
            assert!(pair[0].lower_bound < pair[1].lower_bound);
            assert!(pair[0].level < pair[1].level);
            assert!(pair[0].suggested_green < pair[1].suggested_green);
        }
    }

    #[test]
    fn test_classification_is_monotonic() {
        let mut prev = classify(0);
        for count in 1..=200 {
            let cur = classify(count);
            assert!(
                cur.0 >= prev.0 && cur.1 >= prev.1,
                "classification decreased at {count}: {prev:?} -> {cur:?}"
            );
            prev = cur;
        }
    }

    #[test]
    fn test_level_suggested_green_matches_table() {
        for bucket in &CONGESTION_BUCKETS {
            assert_eq!(bucket.level.suggested_green(), bucket.suggested_green);
            assert_eq!(
                CongestionLevel::from_vehicle_count(bucket.lower_bound),
                bucket.level
            );
        }
    }

    #[test]
    fn test_levels_totally_ordered() {
        assert!(CongestionLevel::None < CongestionLevel::Low);
        assert!(CongestionLevel::Low < CongestionLevel::Moderate);
        assert!(CongestionLevel::Moderate < CongestionLevel::High);
        assert!(CongestionLevel::High < CongestionLevel::Critical);
    }

    #[test]
    fn test_reason_and_name_non_empty() {
        for bucket in &CONGESTION_BUCKETS {
            assert!(!bucket.level.reason().is_empty());
            assert_eq!(bucket.level.to_string(), bucket.level.as_str());
        }
    }
}
