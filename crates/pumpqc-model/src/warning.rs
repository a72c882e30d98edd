use std::fmt;

use serde::{Deserialize, Serialize};

/// Recoverable data anomalies surfaced in the report summary.
///
/// None of these abort an analysis; the QC analyst gets one report per
/// upload regardless of partial data problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// Sheet name carried both single and tandem tokens (or the structural
    /// inference disagreed with itself); classification fell back to Single.
    AmbiguousConfiguration { sheet_label: String },
    /// More than two records shared one derived unit id; extras were
    /// demoted to orphans.
    DuplicateGroup { unit_id: String, extras: usize },
    /// A serial matched more than one P1/P2 marker interpretation and was
    /// demoted to orphan rather than silently picking one.
    ConflictingMarkers { serial: String },
    /// A group of two paired up without a distinct P1/P2 marker on each
    /// member; the pair was kept in input order.
    IndistinctPositions { unit_id: String },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::AmbiguousConfiguration { sheet_label } => {
                write!(
                    f,
                    "sheet '{sheet_label}': ambiguous configuration, defaulted to Single"
                )
            }
            AnalysisWarning::DuplicateGroup { unit_id, extras } => {
                write!(
                    f,
                    "unit '{unit_id}': {extras} extra record(s) with the same unit id, demoted to orphans"
                )
            }
            AnalysisWarning::ConflictingMarkers { serial } => {
                write!(f, "serial '{serial}': conflicting P1/P2 markers, treated as orphan")
            }
            AnalysisWarning::IndistinctPositions { unit_id } => {
                write!(
                    f,
                    "unit '{unit_id}': members lack distinct P1/P2 markers, paired in input order"
                )
            }
        }
    }
}
