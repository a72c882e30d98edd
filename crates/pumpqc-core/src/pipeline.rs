//! Per-sheet analysis pipeline: normalize, classify, pair, summarize.
//!
//! The pipeline never fails on bad data. Every data problem (skipped rows,
//! orphans, duplicate groups, ambiguous classification) lands in the
//! summary as structured data so the analyst always gets one report per
//! upload. Each run owns its entities outright; nothing is shared between
//! analyses.

use std::time::Instant;

use tracing::{info, info_span, warn};

use pumpqc_ingest::normalize_rows;
use pumpqc_model::{
    AnalysisWarning, Configuration, RawRow, ReportSummary, Tolerances,
};

use crate::classify::classify_sheet;
use crate::pairing::pair_records;
use crate::stats::{summarize_records, summarize_units};
use crate::tolerance::check_units;

/// Analyzes one sheet into a report summary.
pub fn analyze_sheet(label: &str, rows: &[RawRow], tolerances: &Tolerances) -> ReportSummary {
    let span = info_span!("analyze_sheet", sheet_label = label);
    let _guard = span.enter();
    let start = Instant::now();

    let normalized = normalize_rows(rows, label);
    let classification = classify_sheet(label, &normalized.records);

    let mut summary = ReportSummary::empty(label, classification.configuration);
    summary.skipped_rows = normalized.skipped;
    if classification.ambiguous {
        warn!(sheet_label = label, "ambiguous configuration, defaulting to Single");
        summary.warnings.push(AnalysisWarning::AmbiguousConfiguration {
            sheet_label: label.to_string(),
        });
    }

    match classification.configuration {
        Configuration::Single => {
            let stats = summarize_records(&normalized.records);
            summary.total_units = stats.total;
            summary.amperage = stats.amperage;
            summary.buckets = stats.buckets;
        }
        Configuration::Tandem => {
            let outcome = pair_records(normalized.records);
            let stats = summarize_units(&outcome.units);
            summary.total_units = stats.total;
            summary.amperage = stats.amperage;
            summary.buckets = stats.buckets;
            summary.orphans = outcome
                .orphans
                .into_iter()
                .map(|record| record.serial)
                .collect();
            summary.warnings.extend(outcome.warnings);
            for result in check_units(&outcome.units, tolerances) {
                if result.is_mismatch() {
                    summary.mismatches.push(result);
                } else {
                    summary.passed_units += 1;
                }
            }
        }
    }

    info!(
        sheet_label = label,
        configuration = %summary.configuration,
        total_units = summary.total_units,
        skipped_rows = summary.skipped_rows,
        orphans = summary.orphan_count(),
        mismatches = summary.mismatch_count(),
        duration_ms = start.elapsed().as_millis(),
        "sheet analyzed"
    );
    summary
}

/// Analyzes a whole upload, one summary per sheet, in input order.
pub fn analyze_sheets(
    sheets: &[(String, Vec<RawRow>)],
    tolerances: &Tolerances,
) -> Vec<ReportSummary> {
    sheets
        .iter()
        .map(|(label, rows)| analyze_sheet(label, rows, tolerances))
        .collect()
}

/// Merges summaries that share one configuration into a single summary
/// under the given label.
///
/// Returns `None` for an empty slice or mixed configurations; the caller
/// then reports per sheet instead of guessing.
pub fn merge_summaries(label: &str, summaries: &[ReportSummary]) -> Option<ReportSummary> {
    let first = summaries.first()?;
    if summaries
        .iter()
        .any(|summary| summary.configuration != first.configuration)
    {
        return None;
    }
    let mut merged = ReportSummary::empty(label, first.configuration);
    for summary in summaries {
        merged.total_units += summary.total_units;
        merged.skipped_rows += summary.skipped_rows;
        merged.passed_units += summary.passed_units;
        merged.buckets.merge(&summary.buckets);
        merged.orphans.extend(summary.orphans.iter().cloned());
        merged.mismatches.extend(summary.mismatches.iter().cloned());
        merged.warnings.extend(summary.warnings.iter().cloned());
        if let Some(range) = summary.amperage {
            match merged.amperage.as_mut() {
                Some(existing) => {
                    existing.include(range.min);
                    existing.include(range.max);
                }
                None => merged.amperage = Some(range),
            }
        }
    }
    Some(merged)
}
