//! Tandem pairing: grouping records into P1/P2 unit pairs by serial.
//!
//! Two records pair when stripping a recognized P1/P2 marker from each
//! serial leaves the same unit identifier ("12345-P1" and "12345-P2" share
//! "12345"). Grouping is deterministic: units come out in the order their
//! unit id first appears in the input.

use std::collections::BTreeMap;

use tracing::warn;

use pumpqc_model::{AnalysisWarning, PumpRecord, TandemUnit};

/// Which half of a tandem assembly a serial claims to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpPosition {
    P1,
    P2,
}

impl PumpPosition {
    fn token(self) -> &'static str {
        match self {
            PumpPosition::P1 => "P1",
            PumpPosition::P2 => "P2",
        }
    }
}

/// A parsed serial: the shared unit id and the claimed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialMarker {
    pub unit_id: String,
    pub position: PumpPosition,
}

/// Outcome of marker parsing for one serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerParse {
    /// No recognized P1/P2 token.
    None,
    /// Exactly one interpretation.
    One(SerialMarker),
    /// More than one distinct interpretation; never silently pick one.
    Conflicting,
}

/// Separators accepted between the unit id and the position token.
const SEPARATORS: &[char] = &['-', '_', ' '];

fn suffix_candidate(serial: &str, upper: &str, position: PumpPosition) -> Option<SerialMarker> {
    let token = position.token();
    let stripped = upper.strip_suffix(token)?;
    let unit_id = if let Some(last) = stripped.chars().last() {
        if SEPARATORS.contains(&last) {
            &serial[..stripped.len() - last.len_utf8()]
        } else if last.is_ascii_digit() {
            // Bare suffix form, e.g. "12345P1".
            &serial[..stripped.len()]
        } else {
            return None;
        }
    } else {
        return None;
    };
    let unit_id = unit_id.trim();
    (!unit_id.is_empty()).then(|| SerialMarker {
        unit_id: unit_id.to_string(),
        position,
    })
}

fn prefix_candidate(serial: &str, upper: &str, position: PumpPosition) -> Option<SerialMarker> {
    let token = position.token();
    let stripped = upper.strip_prefix(token)?;
    let first = stripped.chars().next()?;
    if !SEPARATORS.contains(&first) {
        return None;
    }
    let unit_id = serial[token.len() + first.len_utf8()..].trim();
    (!unit_id.is_empty()).then(|| SerialMarker {
        unit_id: unit_id.to_string(),
        position,
    })
}

/// Parses the P1/P2 marker convention out of a serial.
///
/// Recognized forms: `<id>-P1`, `<id>_P1`, `<id> P1`, `<id>P1` (digit
/// boundary), `P1-<id>`, `P1_<id>`, case-insensitive, P2 likewise. A serial
/// admitting more than one distinct interpretation is conflicting.
pub fn parse_marker(serial: &str) -> MarkerParse {
    let serial = serial.trim();
    let mut upper = serial.to_string();
    upper.make_ascii_uppercase();
    let mut candidates: Vec<SerialMarker> = Vec::new();
    for position in [PumpPosition::P1, PumpPosition::P2] {
        for candidate in [
            suffix_candidate(serial, &upper, position),
            prefix_candidate(serial, &upper, position),
        ]
        .into_iter()
        .flatten()
        {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }
    match candidates.len() {
        0 => MarkerParse::None,
        1 => MarkerParse::One(candidates.remove(0)),
        _ => MarkerParse::Conflicting,
    }
}

/// Result of pairing one tandem-classified record set.
#[derive(Debug, Clone, Default)]
pub struct PairingOutcome {
    pub units: Vec<TandemUnit>,
    pub orphans: Vec<PumpRecord>,
    pub warnings: Vec<AnalysisWarning>,
}

struct Group {
    unit_id: String,
    members: Vec<(PumpRecord, Option<PumpPosition>)>,
}

/// Groups tandem records into P1/P2 units.
///
/// Singleton groups become orphans; groups beyond two members keep their
/// first two and demote the rest, with a duplicate-group warning. A record
/// with conflicting markers is orphaned outright.
pub fn pair_records(records: Vec<PumpRecord>) -> PairingOutcome {
    let mut outcome = PairingOutcome::default();
    let mut groups: Vec<Group> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        let (unit_id, position) = match parse_marker(&record.serial) {
            MarkerParse::One(marker) => (marker.unit_id, Some(marker.position)),
            MarkerParse::None => (record.serial.clone(), None),
            MarkerParse::Conflicting => {
                warn!(serial = %record.serial, "conflicting P1/P2 markers");
                outcome.warnings.push(AnalysisWarning::ConflictingMarkers {
                    serial: record.serial.clone(),
                });
                outcome.orphans.push(record);
                continue;
            }
        };
        let key = unit_id.to_uppercase();
        match index.get(&key) {
            Some(&slot) => groups[slot].members.push((record, position)),
            None => {
                index.insert(key, groups.len());
                groups.push(Group {
                    unit_id,
                    members: vec![(record, position)],
                });
            }
        }
    }

    for group in groups {
        let Group { unit_id, members } = group;
        if members.len() == 1 {
            let (record, _) = members.into_iter().next().expect("singleton group");
            outcome.orphans.push(record);
            continue;
        }
        if members.len() > 2 {
            warn!(
                unit_id = %unit_id,
                extras = members.len() - 2,
                "duplicate serials for unit"
            );
            outcome.warnings.push(AnalysisWarning::DuplicateGroup {
                unit_id: unit_id.clone(),
                extras: members.len() - 2,
            });
        }
        let mut iter = members.into_iter();
        let first = iter.next().expect("group has members");
        let second = iter.next().expect("group has two members");
        for (record, _) in iter {
            outcome.orphans.push(record);
        }
        let distinct = matches!(
            (first.1, second.1),
            (Some(PumpPosition::P1), Some(PumpPosition::P2))
                | (Some(PumpPosition::P2), Some(PumpPosition::P1))
        );
        let (p1, p2) = if distinct {
            if first.1 == Some(PumpPosition::P1) {
                (first.0, second.0)
            } else {
                (second.0, first.0)
            }
        } else {
            outcome.warnings.push(AnalysisWarning::IndistinctPositions {
                unit_id: unit_id.clone(),
            });
            (first.0, second.0)
        };
        outcome.units.push(TandemUnit { unit_id, p1, p2 });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(serial: &str) -> PumpRecord {
        PumpRecord {
            serial: serial.to_string(),
            efficiency: 93.0,
            amperage: 10.0,
            sheet_label: "TandemPump".to_string(),
        }
    }

    #[test]
    fn parses_suffix_and_prefix_forms() {
        for serial in ["12345-P1", "12345_p1", "12345 P1", "12345P1", "P1-12345", "p1_12345"] {
            match parse_marker(serial) {
                MarkerParse::One(marker) => {
                    assert_eq!(marker.unit_id, "12345", "serial {serial}");
                    assert_eq!(marker.position, PumpPosition::P1, "serial {serial}");
                }
                other => panic!("serial {serial}: expected one marker, got {other:?}"),
            }
        }
    }

    #[test]
    fn unmarked_serial_has_no_marker() {
        assert_eq!(parse_marker("12345"), MarkerParse::None);
        // "P" followed by a non-position digit is not a marker.
        assert_eq!(parse_marker("12345-P3"), MarkerParse::None);
    }

    #[test]
    fn conflicting_markers_are_reported() {
        assert_eq!(parse_marker("P1-200-P2"), MarkerParse::Conflicting);
    }

    #[test]
    fn pairs_in_first_appearance_order() {
        let outcome = pair_records(vec![
            record("B-P2"),
            record("A-P1"),
            record("B-P1"),
            record("A-P2"),
        ]);
        assert!(outcome.orphans.is_empty());
        let ids: Vec<&str> = outcome.units.iter().map(|u| u.unit_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        // The P1-marked member lands in p1 even when it arrived second.
        assert_eq!(outcome.units[0].p1.serial, "B-P1");
        assert_eq!(outcome.units[0].p2.serial, "B-P2");
    }

    #[test]
    fn singleton_becomes_orphan() {
        let outcome = pair_records(vec![record("A-P1"), record("A-P2"), record("Z-P1")]);
        assert_eq!(outcome.units.len(), 1);
        assert_eq!(outcome.orphans.len(), 1);
        assert_eq!(outcome.orphans[0].serial, "Z-P1");
    }

    #[test]
    fn oversized_group_demotes_extras() {
        let outcome = pair_records(vec![record("A-P1"), record("A-P2"), record("A-P1")]);
        assert_eq!(outcome.units.len(), 1);
        assert_eq!(outcome.orphans.len(), 1);
        assert!(matches!(
            outcome.warnings.as_slice(),
            [AnalysisWarning::DuplicateGroup { extras: 1, .. }]
        ));
    }

    #[test]
    fn indistinct_positions_pair_in_input_order() {
        let outcome = pair_records(vec![record("X"), record("x")]);
        assert_eq!(outcome.units.len(), 1);
        assert_eq!(outcome.units[0].p1.serial, "X");
        assert!(matches!(
            outcome.warnings.as_slice(),
            [AnalysisWarning::IndistinctPositions { .. }]
        ));
    }
}
