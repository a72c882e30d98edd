//! Row normalization: raw spreadsheet lines to validated pump records.
//!
//! Column names vary between customer spreadsheets, so each canonical field
//! carries an enumerated alias table. Dynamic header guessing is deliberately
//! avoided; an unrecognized column simply never maps to a field.

use tracing::debug;

use pumpqc_model::{PumpRecord, RawRow};

/// Recognized headers for the pump serial column.
pub const SERIAL_ALIASES: &[&str] = &[
    "pump sr. no",
    "pump sr no",
    "pump serial",
    "serial",
    "serial no",
    "sr. no",
    "sr no",
];

/// Recognized headers for the volumetric efficiency column.
pub const EFFICIENCY_ALIASES: &[&str] = &["eff%", "eff %", "eff", "efficiency", "vol eff%"];

/// Recognized headers for the amperage column.
pub const AMPERAGE_ALIASES: &[&str] = &["amp", "amps", "amperage", "amp (a)", "current"];

/// Normalization outcome: valid records plus the count of rows dropped for
/// missing or invalid fields. Skips are recoverable by design.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRows {
    pub records: Vec<PumpRecord>,
    pub skipped: usize,
}

/// Canonical form used for header comparison: trimmed, whitespace collapsed,
/// lowercased.
fn canon(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    for part in header.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&part.to_lowercase());
    }
    out
}

/// True when a header matches any recognized alias of any field. Used by the
/// table reader to locate the header row inside banner-heavy sheets.
pub fn is_recognized_header(header: &str) -> bool {
    let canonical = canon(header);
    [SERIAL_ALIASES, EFFICIENCY_ALIASES, AMPERAGE_ALIASES]
        .iter()
        .any(|aliases| aliases.contains(&canonical.as_str()))
}

/// All recognized aliases grouped by canonical field, for help output.
pub fn recognized_aliases() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        ("serial", SERIAL_ALIASES),
        ("efficiency", EFFICIENCY_ALIASES),
        ("amperage", AMPERAGE_ALIASES),
    ]
}

fn field<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    row.iter()
        .find(|(header, _)| aliases.contains(&canon(header).as_str()))
        .map(|(_, value)| value.trim())
}

fn parse_efficiency(raw: &str) -> Option<f64> {
    // Some sheets write the percent sign into the cell.
    let cleaned = raw.trim().trim_end_matches('%').trim();
    let value: f64 = cleaned.parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value)
}

fn parse_amperage(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value > 0.0).then_some(value)
}

/// Converts raw rows from one sheet into validated records.
///
/// A row is skipped (counted, never fatal) when its serial is empty, its
/// efficiency is non-numeric or outside [0, 100], or its amperage is
/// non-numeric or not strictly positive.
pub fn normalize_rows(rows: &[RawRow], sheet_label: &str) -> NormalizedRows {
    let mut out = NormalizedRows::default();
    for (index, row) in rows.iter().enumerate() {
        let serial = field(row, SERIAL_ALIASES).unwrap_or("");
        if serial.is_empty() {
            debug!(sheet_label, row = index, "skipping row: missing serial");
            out.skipped += 1;
            continue;
        }
        let efficiency = field(row, EFFICIENCY_ALIASES).and_then(parse_efficiency);
        let amperage = field(row, AMPERAGE_ALIASES).and_then(parse_amperage);
        match (efficiency, amperage) {
            (Some(efficiency), Some(amperage)) => out.records.push(PumpRecord {
                serial: serial.to_string(),
                efficiency,
                amperage,
                sheet_label: sheet_label.to_string(),
            }),
            _ => {
                debug!(
                    sheet_label,
                    row = index,
                    serial,
                    "skipping row: invalid efficiency or amperage"
                );
                out.skipped += 1;
            }
        }
    }
    out
}
