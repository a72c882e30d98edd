use serde::{Deserialize, Serialize};

use crate::unit::TandemUnit;

/// Default maximum relative amperage difference between P1 and P2, percent.
pub const DEFAULT_AMPERAGE_TOLERANCE_PCT: f64 = 10.0;
/// Default maximum relative efficiency difference between P1 and P2, percent.
pub const DEFAULT_EFFICIENCY_TOLERANCE_PCT: f64 = 3.0;

/// Matching thresholds for tandem pairs.
///
/// Owned by the caller and passed into the analyzer so QC staff (and tests)
/// can tighten or relax them per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub amperage_pct: f64,
    pub efficiency_pct: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            amperage_pct: DEFAULT_AMPERAGE_TOLERANCE_PCT,
            efficiency_pct: DEFAULT_EFFICIENCY_TOLERANCE_PCT,
        }
    }
}

/// P1 vs P2 matching outcome for one tandem unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceResult {
    pub unit: TandemUnit,
    /// `|p1 - p2| / max(p1, p2) * 100` over amperage.
    pub amperage_delta_pct: f64,
    /// Same formula over efficiency.
    pub efficiency_delta_pct: f64,
    pub amperage_fail: bool,
    pub efficiency_fail: bool,
}

impl ToleranceResult {
    /// True when either reading is out of tolerance; such units are listed
    /// individually in the report.
    pub fn is_mismatch(&self) -> bool {
        self.amperage_fail || self.efficiency_fail
    }
}
