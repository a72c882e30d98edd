//! CSV table reading with header-row detection.
//!
//! Test sheets commonly carry a company banner, customer details, and blank
//! lines above the actual data grid, so the header row has to be located
//! rather than assumed at line one.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use pumpqc_model::RawRow;

use crate::error::{IngestError, Result};
use crate::normalize::is_recognized_header;

/// One parsed sheet: located header row plus the data rows beneath it.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// True when any cell matches a recognized column alias. This mirrors how
/// the QC sheets are actually located: the data grid starts at the row that
/// names the serial or efficiency column.
fn has_recognized_header(row: &[String]) -> bool {
    row.iter().any(|cell| is_recognized_header(cell))
}

/// Structural fallback for sheets with unrecognized column names: mostly
/// non-empty, mostly non-numeric cells.
fn looks_like_header(row: &[String]) -> bool {
    let non_empty = row.iter().filter(|cell| !cell.is_empty()).count();
    if non_empty < 2 {
        return false;
    }
    let numeric = row
        .iter()
        .filter(|cell| cell.parse::<f64>().is_ok())
        .count();
    numeric == 0
}

fn detect_header_row(rows: &[Vec<String>]) -> Option<usize> {
    if let Some(index) = rows.iter().position(|row| has_recognized_header(row)) {
        return Some(index);
    }
    rows.iter().position(|row| looks_like_header(row))
}

/// Reads one CSV sheet, locating the header row and mapping every data row
/// into a header-to-value map.
///
/// Returns an empty table (not an error) when the sheet has no locatable
/// header; empty input is a reportable condition, not a failure.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let Some(header_index) = detect_header_row(&raw_rows) else {
        debug!(path = %path.display(), "no header row found, treating sheet as empty");
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = raw_rows[header_index].clone();
    let mut rows = Vec::new();
    for record in raw_rows.iter().skip(header_index + 1) {
        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.insert(header.clone(), value.to_string());
        }
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        header_index,
        row_count = rows.len(),
        "csv table loaded"
    );
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|line| line.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn header_detection_prefers_recognized_aliases() {
        let data = rows(&[
            &["VBC HYDRAULICS", "", ""],
            &["Customer", "XYZ", ""],
            &["Pump Sr. No", "Eff%", "Amp"],
            &["A-P1", "93", "10"],
        ]);
        assert_eq!(detect_header_row(&data), Some(2));
    }

    #[test]
    fn header_detection_falls_back_to_structure() {
        let data = rows(&[&["Id", "Reading", "Station"], &["X1", "93", "north"]]);
        assert_eq!(detect_header_row(&data), Some(0));
    }

    #[test]
    fn no_header_in_pure_numbers() {
        let data = rows(&[&["1", "2"], &["3", "4"]]);
        assert_eq!(detect_header_row(&data), None);
    }
}
