//! Sheet discovery: turning a file or folder argument into labeled sheets.
//!
//! Each CSV file stands in for one workbook sheet; the file stem is the
//! sheet label the classifier sees (e.g. `TandemPump.csv` -> "TandemPump").

use std::path::{Path, PathBuf};

use tracing::debug;

use pumpqc_model::RawRow;

use crate::error::{IngestError, Result};
use crate::table::read_csv_table;

/// A discovered sheet waiting to be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    /// Sheet label derived from the file stem.
    pub label: String,
    pub path: PathBuf,
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Files that sit next to test data but are not sheets themselves.
fn is_metadata_stem(stem: &str) -> bool {
    let upper = stem.to_uppercase();
    ["README", "NOTES", "METADATA"]
        .iter()
        .any(|token| upper.contains(token))
}

fn sheet_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Sheet")
        .to_string()
}

/// Resolves an input path into sheet sources.
///
/// A single CSV file yields one sheet; a directory yields one sheet per CSV
/// file it contains, sorted by filename so runs are reproducible.
pub fn discover_sheets(input: &Path) -> Result<Vec<SheetSource>> {
    if !input.exists() {
        return Err(IngestError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    if input.is_file() {
        if !is_csv(input) {
            return Err(IngestError::UnsupportedInput {
                path: input.to_path_buf(),
            });
        }
        return Ok(vec![SheetSource {
            label: sheet_label(input),
            path: input.to_path_buf(),
        }]);
    }
    if !input.is_dir() {
        return Err(IngestError::UnsupportedInput {
            path: input.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(input).map_err(|source| IngestError::DirectoryRead {
        path: input.to_path_buf(),
        source,
    })?;
    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: input.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || !is_csv(&path) {
            continue;
        }
        let label = sheet_label(&path);
        if is_metadata_stem(&label) {
            debug!(path = %path.display(), "skipping metadata-looking file");
            continue;
        }
        sources.push(SheetSource { label, path });
    }
    sources.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(sources)
}

/// Loads every discovered sheet into `(label, rows)` pairs, the core input
/// contract of the analysis engine.
pub fn load_sheets(sources: &[SheetSource]) -> Result<Vec<(String, Vec<RawRow>)>> {
    let mut sheets = Vec::with_capacity(sources.len());
    for source in sources {
        let table = read_csv_table(&source.path)?;
        sheets.push((source.label.clone(), table.rows));
    }
    Ok(sheets)
}
