use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One raw spreadsheet line: header name -> cell text, no invariants.
///
/// Empty cells arrive as empty strings; missing columns are simply absent.
pub type RawRow = BTreeMap<String, String>;

/// A validated pump test reading, produced by the row normalizer.
///
/// Immutable once created; rows that fail validation never become records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpRecord {
    /// Pump serial number as printed on the test sheet (e.g. "12345-P1").
    pub serial: String,
    /// Volumetric efficiency in percent, within [0, 100].
    pub efficiency: f64,
    /// Measured amperage, strictly positive.
    pub amperage: f64,
    /// Label of the sheet or file the row came from.
    pub sheet_label: String,
}

/// Pump configuration of a dataset: one pump per unit, or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    Single,
    Tandem,
}

impl Configuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Single => "Single",
            Configuration::Tandem => "Tandem",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
