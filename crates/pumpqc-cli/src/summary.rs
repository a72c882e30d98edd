use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pumpqc_model::{ReportSummary, ToleranceResult};

use crate::types::AnalysisResult;

pub fn print_summary(result: &AnalysisResult) {
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Config"),
        header_cell("Units"),
        header_cell("Amp min"),
        header_cell("Amp max"),
        header_cell("<90"),
        header_cell("90-92"),
        header_cell("92-94"),
        header_cell("94+"),
        header_cell("Skipped"),
        header_cell("Orphans"),
        header_cell("Mismatch"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..12 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &result.summaries {
        table.add_row(vec![
            Cell::new(&summary.sheet_label)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.configuration.as_str()),
            Cell::new(summary.total_units),
            amp_cell(summary, |range| range.min),
            amp_cell(summary, |range| range.max),
            Cell::new(summary.buckets.below_threshold),
            Cell::new(summary.buckets.from_90_to_92),
            Cell::new(summary.buckets.from_92_to_94),
            Cell::new(summary.buckets.from_94_plus),
            count_cell(summary.skipped_rows, Color::Yellow),
            count_cell(summary.orphan_count(), Color::Yellow),
            count_cell(summary.mismatch_count(), Color::Red),
        ]);
    }
    println!("{table}");
    print_mismatch_table(&result.summaries);
    print_notes(&result.summaries);
}

fn print_mismatch_table(summaries: &[ReportSummary]) {
    let mismatches: Vec<(&str, &ToleranceResult)> = summaries
        .iter()
        .flat_map(|summary| {
            summary
                .mismatches
                .iter()
                .map(move |result| (summary.sheet_label.as_str(), result))
        })
        .collect();
    if mismatches.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Unit"),
        header_cell("P1 amp"),
        header_cell("P2 amp"),
        header_cell("Amp diff %"),
        header_cell("P1 eff"),
        header_cell("P2 eff"),
        header_cell("Eff diff %"),
    ]);
    apply_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (sheet, result) in mismatches {
        table.add_row(vec![
            Cell::new(sheet),
            Cell::new(&result.unit.unit_id).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", result.unit.p1.amperage)),
            Cell::new(format!("{:.2}", result.unit.p2.amperage)),
            delta_cell(result.amperage_delta_pct, result.amperage_fail),
            Cell::new(format!("{:.2}", result.unit.p1.efficiency)),
            Cell::new(format!("{:.2}", result.unit.p2.efficiency)),
            delta_cell(result.efficiency_delta_pct, result.efficiency_fail),
        ]);
    }
    println!();
    println!("Mismatched tandem units:");
    println!("{table}");
}

fn print_notes(summaries: &[ReportSummary]) {
    let mut notes = Vec::new();
    for summary in summaries {
        if !summary.orphans.is_empty() {
            notes.push(format!(
                "{}: unpaired records: {}",
                summary.sheet_label,
                summary.orphans.join(", ")
            ));
        }
        for warning in &summary.warnings {
            notes.push(format!("{}: {warning}", summary.sheet_label));
        }
    }
    if notes.is_empty() {
        return;
    }
    eprintln!("Notes:");
    for note in notes {
        eprintln!("- {note}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn amp_cell(summary: &ReportSummary, pick: impl Fn(&pumpqc_model::AmperageRange) -> f64) -> Cell {
    match summary.amperage.as_ref() {
        Some(range) => Cell::new(format!("{:.2}", pick(range))),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn delta_cell(delta_pct: f64, failed: bool) -> Cell {
    let cell = Cell::new(format!("{delta_pct:.2}"));
    if failed {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
