//! Amperage range and efficiency distribution statistics.
//!
//! The counting contract for QC: Single datasets count rows, Tandem
//! datasets count units (one per pair), with each unit represented by the
//! mean of its two pumps.

use pumpqc_model::{AmperageRange, BucketCounts, PumpRecord, TandemUnit};

/// Aggregate statistics for one dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    /// Rows for Single, units for Tandem.
    pub total: usize,
    /// Absent (not zero) when the dataset has no valid reading.
    pub amperage: Option<AmperageRange>,
    pub buckets: BucketCounts,
}

fn summarize(values: impl Iterator<Item = (f64, f64)>) -> Stats {
    let mut stats = Stats::default();
    for (efficiency, amperage) in values {
        stats.total += 1;
        stats.buckets.record(efficiency);
        match stats.amperage.as_mut() {
            Some(range) => range.include(amperage),
            None => stats.amperage = Some(AmperageRange::of(amperage)),
        }
    }
    stats
}

/// Single mode: one row, one count.
pub fn summarize_records(records: &[PumpRecord]) -> Stats {
    summarize(records.iter().map(|r| (r.efficiency, r.amperage)))
}

/// Tandem mode: one unit, one count, represented by the P1/P2 mean.
pub fn summarize_units(units: &[TandemUnit]) -> Stats {
    summarize(units.iter().map(|u| (u.mean_efficiency(), u.mean_amperage())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(efficiency: f64, amperage: f64) -> PumpRecord {
        PumpRecord {
            serial: "S".to_string(),
            efficiency,
            amperage,
            sheet_label: "sheet".to_string(),
        }
    }

    #[test]
    fn empty_input_has_absent_range() {
        let stats = summarize_records(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.amperage.is_none());
        assert_eq!(stats.buckets.total(), 0);
    }

    #[test]
    fn below_threshold_values_still_count() {
        let stats = summarize_records(&[record(88.0, 9.0), record(93.0, 11.0)]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.buckets.below_threshold, 1);
        assert_eq!(stats.buckets.from_92_to_94, 1);
        let range = stats.amperage.expect("range present");
        assert!((range.min - 9.0).abs() < f64::EPSILON);
        assert!((range.max - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tandem_counts_units_not_pumps() {
        let units: Vec<TandemUnit> = (0..10)
            .map(|i| TandemUnit {
                unit_id: format!("U{i}"),
                p1: record(93.0, 10.0),
                p2: record(95.0, 12.0),
            })
            .collect();
        let stats = summarize_units(&units);
        // 20 pump records, 10 units: the report counts 10.
        assert_eq!(stats.total, 10);
        // Mean efficiency 94.0 lands in the open-ended top bucket.
        assert_eq!(stats.buckets.from_94_plus, 10);
        let range = stats.amperage.expect("range present");
        assert!((range.min - 11.0).abs() < f64::EPSILON);
        assert!((range.max - 11.0).abs() < f64::EPSILON);
    }
}
