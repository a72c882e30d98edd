use serde::{Deserialize, Serialize};

use crate::record::PumpRecord;

/// One tandem assembly: two pumps tested together and shipped as a pair.
///
/// Always has exactly two members; unpaired records stay orphans and never
/// become half-empty units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TandemUnit {
    /// Shared assembly identifier derived from the member serials
    /// (e.g. "12345" for "12345-P1" / "12345-P2").
    pub unit_id: String,
    pub p1: PumpRecord,
    pub p2: PumpRecord,
}

impl TandemUnit {
    /// Representative efficiency for bucketing and min/max: mean of P1 and P2.
    pub fn mean_efficiency(&self) -> f64 {
        (self.p1.efficiency + self.p2.efficiency) / 2.0
    }

    /// Representative amperage: mean of P1 and P2.
    pub fn mean_amperage(&self) -> f64 {
        (self.p1.amperage + self.p2.amperage) / 2.0
    }
}
