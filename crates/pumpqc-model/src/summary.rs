use serde::{Deserialize, Serialize};

use crate::bucket::BucketCounts;
use crate::record::Configuration;
use crate::tolerance::ToleranceResult;
use crate::warning::AnalysisWarning;

/// Observed amperage range. Absent from the summary when no valid reading
/// exists, never reported as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmperageRange {
    pub min: f64,
    pub max: f64,
}

impl AmperageRange {
    /// Widens the range to include one reading.
    pub fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn of(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// The complete analysis output for one sheet (or one merged dataset).
///
/// This is the sole product of the analysis engine; renderers format it,
/// they never recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub sheet_label: String,
    pub configuration: Configuration,
    /// Units for Tandem, rows for Single. A tandem pair counts once.
    pub total_units: usize,
    pub amperage: Option<AmperageRange>,
    pub buckets: BucketCounts,
    /// Rows dropped by the normalizer for missing or invalid fields.
    pub skipped_rows: usize,
    /// Serials of tandem-mode records that could not be paired.
    pub orphans: Vec<String>,
    /// Tandem units passing both tolerance checks (counted, not listed).
    pub passed_units: usize,
    /// Tandem units failing at least one tolerance check, with deltas.
    pub mismatches: Vec<ToleranceResult>,
    pub warnings: Vec<AnalysisWarning>,
}

impl ReportSummary {
    /// An all-zero summary for a dataset with no valid records.
    pub fn empty(sheet_label: &str, configuration: Configuration) -> Self {
        Self {
            sheet_label: sheet_label.to_string(),
            configuration,
            total_units: 0,
            amperage: None,
            buckets: BucketCounts::default(),
            skipped_rows: 0,
            orphans: Vec::new(),
            passed_units: 0,
            mismatches: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatches.len()
    }

    pub fn has_findings(&self) -> bool {
        !self.mismatches.is_empty() || !self.orphans.is_empty() || !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_widens_both_ways() {
        let mut range = AmperageRange::of(10.0);
        range.include(12.5);
        range.include(8.0);
        assert!((range.min - 8.0).abs() < f64::EPSILON);
        assert!((range.max - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_round_trips_through_json() {
        let summary = ReportSummary::empty("SinglePump", Configuration::Single);
        let json = serde_json::to_string(&summary).expect("serialize summary");
        let round: ReportSummary = serde_json::from_str(&json).expect("deserialize summary");
        assert_eq!(round, summary);
        assert!(round.amperage.is_none());
    }
}
