//! Single vs Tandem classification for one sheet.

use std::collections::BTreeMap;

use tracing::debug;

use pumpqc_model::{Configuration, PumpRecord};

use crate::pairing::{MarkerParse, parse_marker};

/// Classification decision plus whether the signals were mixed.
///
/// Ambiguity is never fatal: mixed signals fall back to Single and the
/// pipeline records a warning in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub configuration: Configuration,
    pub ambiguous: bool,
}

/// Decides the configuration of a sheet.
///
/// Sheet-name keywords win: a label containing "tandem" or "single"
/// (case-insensitive) settles the question, both at once is ambiguous.
/// Without a keyword the record structure decides: the set is Tandem only
/// when every serial participates in exactly one detectable P1/P2 pair.
pub fn classify_sheet(label: &str, records: &[PumpRecord]) -> Classification {
    let lower = label.to_lowercase();
    let names_tandem = lower.contains("tandem");
    let names_single = lower.contains("single");
    let classification = match (names_tandem, names_single) {
        (true, true) => Classification {
            configuration: Configuration::Single,
            ambiguous: true,
        },
        (true, false) => Classification {
            configuration: Configuration::Tandem,
            ambiguous: false,
        },
        (false, true) => Classification {
            configuration: Configuration::Single,
            ambiguous: false,
        },
        (false, false) => Classification {
            configuration: infer_from_structure(records),
            ambiguous: false,
        },
    };
    debug!(
        sheet_label = label,
        configuration = %classification.configuration,
        ambiguous = classification.ambiguous,
        "sheet classified"
    );
    classification
}

/// Tandem iff the set is non-empty, every serial carries exactly one P1/P2
/// marker, and every derived unit id groups exactly two records with
/// distinct positions.
fn infer_from_structure(records: &[PumpRecord]) -> Configuration {
    if records.is_empty() {
        return Configuration::Single;
    }
    let mut groups: BTreeMap<String, Vec<crate::pairing::PumpPosition>> = BTreeMap::new();
    for record in records {
        match parse_marker(&record.serial) {
            MarkerParse::One(marker) => {
                groups
                    .entry(marker.unit_id.to_uppercase())
                    .or_default()
                    .push(marker.position);
            }
            MarkerParse::None | MarkerParse::Conflicting => return Configuration::Single,
        }
    }
    let paired = groups
        .values()
        .all(|positions| positions.len() == 2 && positions[0] != positions[1]);
    if paired {
        Configuration::Tandem
    } else {
        Configuration::Single
    }
}
