use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use pumpqc_core::{analyze_sheets, merge_summaries};
use pumpqc_ingest::{discover_sheets, load_sheets, recognized_aliases};
use pumpqc_model::Tolerances;
use pumpqc_report::{ReportOptions, render_report, write_report};

use crate::cli::AnalyzeArgs;
use crate::summary::apply_table_style;
use crate::types::AnalysisResult;

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Recognized column names"]);
    apply_table_style(&mut table);
    for (field, aliases) in recognized_aliases() {
        table.add_row(vec![field.to_string(), aliases.join(", ")]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let span = info_span!("analyze", input = %args.input.display());
    let _guard = span.enter();

    let tolerances = Tolerances {
        amperage_pct: args
            .amp_tolerance
            .unwrap_or(Tolerances::default().amperage_pct),
        efficiency_pct: args
            .eff_tolerance
            .unwrap_or(Tolerances::default().efficiency_pct),
    };

    // =========================================================================
    // Stage 1: Ingest - discover sheets and load raw rows
    // =========================================================================
    let ingest_start = Instant::now();
    let sources = discover_sheets(&args.input).context("discover sheets")?;
    let sheets = load_sheets(&sources).context("load sheets")?;
    let row_count: usize = sheets.iter().map(|(_, rows)| rows.len()).sum();
    info!(
        sheet_count = sheets.len(),
        row_count,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Analyze - one summary per sheet, optionally merged
    // =========================================================================
    let mut summaries = analyze_sheets(&sheets, &tolerances);
    if args.merge {
        match merge_summaries("all sheets", &summaries) {
            Some(merged) => summaries = vec![merged],
            None => warn!("sheets have mixed configurations, keeping per-sheet summaries"),
        }
    }
    let has_mismatches = summaries
        .iter()
        .any(|summary| summary.mismatch_count() > 0);

    // =========================================================================
    // Stage 3: Report - write the QC report when requested
    // =========================================================================
    let mut report_path = None;
    if let Some(path) = &args.report {
        let options = ReportOptions {
            customer: args.customer.clone(),
            order_no: args.order_no.clone(),
            generated_on: None,
        };
        let content = render_report(&summaries, &tolerances, &options);
        write_report(path, &content)?;
        info!(path = %path.display(), "report written");
        report_path = Some(path.clone());
    }

    Ok(AnalysisResult {
        summaries,
        report_path,
        has_mismatches,
    })
}
