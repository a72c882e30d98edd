use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of the reportable efficiency range.
pub const BUCKET_FLOOR: f64 = 90.0;
/// Boundary between the 90-92 and 92-94 buckets.
pub const BUCKET_MID: f64 = 92.0;
/// Lower bound of the open-ended top bucket.
pub const BUCKET_TOP: f64 = 94.0;

/// Efficiency distribution bucket. Intervals are half-open `[low, high)`;
/// the top bucket is open-ended and boundary values belong to the bucket
/// they open (92.0 falls in 92-94, not 90-92).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyBucket {
    /// Below 90%: outside the reportable distribution but still counted.
    BelowThreshold,
    /// 90% <= v < 92%.
    From90To92,
    /// 92% <= v < 94%.
    From92To94,
    /// v >= 94%.
    From94Plus,
}

impl EfficiencyBucket {
    /// Assigns a value to exactly one bucket.
    pub fn for_value(value: f64) -> Self {
        if value >= BUCKET_TOP {
            EfficiencyBucket::From94Plus
        } else if value >= BUCKET_MID {
            EfficiencyBucket::From92To94
        } else if value >= BUCKET_FLOOR {
            EfficiencyBucket::From90To92
        } else {
            EfficiencyBucket::BelowThreshold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyBucket::BelowThreshold => "below 90%",
            EfficiencyBucket::From90To92 => "90% - 92%",
            EfficiencyBucket::From92To94 => "92% - 94%",
            EfficiencyBucket::From94Plus => "94% and above",
        }
    }
}

impl fmt::Display for EfficiencyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-bucket tallies for one analyzed dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub below_threshold: usize,
    pub from_90_to_92: usize,
    pub from_92_to_94: usize,
    pub from_94_plus: usize,
}

impl BucketCounts {
    /// Tallies one representative efficiency value.
    pub fn record(&mut self, value: f64) {
        match EfficiencyBucket::for_value(value) {
            EfficiencyBucket::BelowThreshold => self.below_threshold += 1,
            EfficiencyBucket::From90To92 => self.from_90_to_92 += 1,
            EfficiencyBucket::From92To94 => self.from_92_to_94 += 1,
            EfficiencyBucket::From94Plus => self.from_94_plus += 1,
        }
    }

    /// Adds another tally into this one (used when merging sheet summaries).
    pub fn merge(&mut self, other: &BucketCounts) {
        self.below_threshold += other.below_threshold;
        self.from_90_to_92 += other.from_90_to_92;
        self.from_92_to_94 += other.from_92_to_94;
        self.from_94_plus += other.from_94_plus;
    }

    /// Total across all buckets, below-threshold included.
    pub fn total(&self) -> usize {
        self.below_threshold + self.from_90_to_92 + self.from_92_to_94 + self.from_94_plus
    }
}
