use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use pumpqc_model::{Configuration, ReportSummary, ToleranceResult, Tolerances};

/// Header details for the rendered report.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub customer: Option<String>,
    pub order_no: Option<String>,
    /// Report date; defaults to today. Tests pin this for stable output.
    pub generated_on: Option<NaiveDate>,
}

fn section(lines: &mut String, title: &str) {
    lines.push('\n');
    lines.push_str(title);
    lines.push('\n');
    for _ in 0..title.len() {
        lines.push('-');
    }
    lines.push('\n');
}

fn configuration_line(summary: &ReportSummary) -> String {
    match summary.configuration {
        Configuration::Tandem => format!(
            "{}: {} Tandem units (each with 2 pumps)",
            summary.sheet_label, summary.total_units
        ),
        Configuration::Single => format!(
            "{}: {} Single pump units",
            summary.sheet_label, summary.total_units
        ),
    }
}

fn worst_amperage(mismatches: &[ToleranceResult]) -> Option<&ToleranceResult> {
    mismatches
        .iter()
        .filter(|result| result.amperage_fail)
        .max_by(|a, b| {
            a.amperage_delta_pct
                .partial_cmp(&b.amperage_delta_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn worst_efficiency(mismatches: &[ToleranceResult]) -> Option<&ToleranceResult> {
    mismatches
        .iter()
        .filter(|result| result.efficiency_fail)
        .max_by(|a, b| {
            a.efficiency_delta_pct
                .partial_cmp(&b.efficiency_delta_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Renders the written QC report over the analyzed sheets.
///
/// Report length stays proportional to problems found: passing units are
/// counted, only mismatches, orphans, and warnings are listed.
pub fn render_report(
    summaries: &[ReportSummary],
    tolerances: &Tolerances,
    options: &ReportOptions,
) -> String {
    let mut out = String::new();
    out.push_str("PUMP PERFORMANCE TEST REPORT\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');
    if let Some(customer) = &options.customer {
        let _ = writeln!(out, "Customer: {customer}");
    }
    if let Some(order_no) = &options.order_no {
        let _ = writeln!(out, "Order No.: {order_no}");
    }
    let date = options
        .generated_on
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let _ = writeln!(out, "Generated: {date}");

    section(&mut out, "PUMP CONFIGURATION ANALYSIS:");
    let mut total_units = 0usize;
    for summary in summaries {
        out.push_str(&configuration_line(summary));
        out.push('\n');
        total_units += summary.total_units;
    }
    let _ = writeln!(out, "Total units tested: {total_units}");

    section(&mut out, "AMPERAGE ANALYSIS:");
    for summary in summaries {
        let _ = writeln!(out, "{}:", summary.sheet_label);
        match summary.amperage {
            Some(range) => {
                let _ = writeln!(out, "  Minimum amperage: {:.2} A", range.min);
                let _ = writeln!(out, "  Maximum amperage: {:.2} A", range.max);
            }
            None => out.push_str("  No amperage data available\n"),
        }
    }

    section(&mut out, "EFFICIENCY DISTRIBUTION:");
    for summary in summaries {
        let buckets = &summary.buckets;
        let _ = writeln!(out, "{}:", summary.sheet_label);
        let _ = writeln!(out, "  90% - 92%:     {} units", buckets.from_90_to_92);
        let _ = writeln!(out, "  92% - 94%:     {} units", buckets.from_92_to_94);
        let _ = writeln!(out, "  94% and above: {} units", buckets.from_94_plus);
        if buckets.below_threshold > 0 {
            let _ = writeln!(out, "  Below 90%:     {} units", buckets.below_threshold);
        }
    }

    let tandem: Vec<&ReportSummary> = summaries
        .iter()
        .filter(|summary| summary.configuration == Configuration::Tandem)
        .collect();
    if !tandem.is_empty() {
        section(&mut out, "TANDEM PUMP MATCHING (P1 vs P2):");
        let _ = writeln!(
            out,
            "Tolerances: amperage {:.1}%, efficiency {:.1}%",
            tolerances.amperage_pct, tolerances.efficiency_pct
        );
        for summary in &tandem {
            let _ = writeln!(out, "{}:", summary.sheet_label);
            let _ = writeln!(out, "  Units within tolerance: {}", summary.passed_units);
            let _ = writeln!(out, "  Units out of tolerance: {}", summary.mismatch_count());
            for result in &summary.mismatches {
                let mut readings = Vec::new();
                if result.amperage_fail {
                    readings.push(format!("amperage diff {:.1}%", result.amperage_delta_pct));
                }
                if result.efficiency_fail {
                    readings.push(format!("efficiency diff {:.2}%", result.efficiency_delta_pct));
                }
                let _ = writeln!(
                    out,
                    "  Unit {}: {}",
                    result.unit.unit_id,
                    readings.join(", ")
                );
            }
            if let Some(worst) = worst_amperage(&summary.mismatches) {
                let _ = writeln!(
                    out,
                    "  Worst amperage mismatch: {:.1}% (Unit {})",
                    worst.amperage_delta_pct, worst.unit.unit_id
                );
            }
            if let Some(worst) = worst_efficiency(&summary.mismatches) {
                let _ = writeln!(
                    out,
                    "  Worst efficiency mismatch: {:.2}% (Unit {})",
                    worst.efficiency_delta_pct, worst.unit.unit_id
                );
            }
            if summary.mismatches.is_empty() {
                out.push_str("  All tandem units within tolerance\n");
            }
        }
    }

    let has_quality_notes = summaries.iter().any(|summary| {
        summary.skipped_rows > 0 || !summary.orphans.is_empty() || !summary.warnings.is_empty()
    });
    if has_quality_notes {
        section(&mut out, "DATA QUALITY:");
        for summary in summaries {
            if summary.skipped_rows == 0
                && summary.orphans.is_empty()
                && summary.warnings.is_empty()
            {
                continue;
            }
            let _ = writeln!(out, "{}:", summary.sheet_label);
            if summary.skipped_rows > 0 {
                let _ = writeln!(out, "  Rows skipped: {}", summary.skipped_rows);
            }
            if !summary.orphans.is_empty() {
                let _ = writeln!(
                    out,
                    "  Orphan records: {} ({})",
                    summary.orphan_count(),
                    summary.orphans.join(", ")
                );
            }
            for warning in &summary.warnings {
                let _ = writeln!(out, "  Warning: {warning}");
            }
        }
    }

    out
}

/// Writes the rendered report next to the analyzed data.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("write report: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpqc_core::analyze_sheet;
    use pumpqc_model::RawRow;

    fn row(serial: &str, efficiency: &str, amperage: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert("Pump Sr. No".to_string(), serial.to_string());
        row.insert("Eff%".to_string(), efficiency.to_string());
        row.insert("Amp".to_string(), amperage.to_string());
        row
    }

    fn options() -> ReportOptions {
        ReportOptions {
            customer: Some("Customer XYZ".to_string()),
            order_no: Some("ORD-1234".to_string()),
            generated_on: NaiveDate::from_ymd_opt(2026, 8, 26),
        }
    }

    #[test]
    fn report_lists_mismatches_and_orphans() {
        let rows = vec![
            row("A-P1", "93", "10"),
            row("A-P2", "95", "12"),
            row("Z-P1", "92", "9"),
        ];
        let tolerances = Tolerances::default();
        let summary = analyze_sheet("TandemPump", &rows, &tolerances);
        let report = render_report(&[summary], &tolerances, &options());

        assert!(report.contains("PUMP PERFORMANCE TEST REPORT"));
        assert!(report.contains("Customer: Customer XYZ"));
        assert!(report.contains("TandemPump: 1 Tandem units (each with 2 pumps)"));
        assert!(report.contains("Units out of tolerance: 1"));
        assert!(report.contains("Unit A: amperage diff 16.7%"));
        assert!(report.contains("Worst amperage mismatch: 16.7% (Unit A)"));
        assert!(report.contains("Orphan records: 1 (Z-P1)"));
    }

    #[test]
    fn clean_single_report_has_no_quality_section() {
        let rows = vec![row("1001", "91", "8.5"), row("1002", "93", "8.9")];
        let tolerances = Tolerances::default();
        let summary = analyze_sheet("SinglePump", &rows, &tolerances);
        let report = render_report(&[summary], &tolerances, &options());

        assert!(report.contains("SinglePump: 2 Single pump units"));
        assert!(report.contains("Total units tested: 2"));
        assert!(report.contains("Minimum amperage: 8.50 A"));
        assert!(!report.contains("DATA QUALITY"));
        assert!(!report.contains("TANDEM PUMP MATCHING"));
    }

    #[test]
    fn empty_summary_renders_without_data() {
        let tolerances = Tolerances::default();
        let summary = analyze_sheet("Sheet1", &[], &tolerances);
        let report = render_report(&[summary], &tolerances, &options());
        assert!(report.contains("Total units tested: 0"));
        assert!(report.contains("No amperage data available"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let rows = vec![row("A-P1", "93", "10"), row("A-P2", "95", "12")];
        let tolerances = Tolerances::default();
        let summary = analyze_sheet("TandemPump", &rows, &tolerances);
        let first = render_report(&[summary.clone()], &tolerances, &options());
        let second = render_report(&[summary], &tolerances, &options());
        assert_eq!(first, second);
    }
}
