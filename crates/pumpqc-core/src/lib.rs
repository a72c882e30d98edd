pub mod classify;
pub mod pairing;
pub mod pipeline;
pub mod stats;
pub mod tolerance;

pub use classify::{Classification, classify_sheet};
pub use pairing::{MarkerParse, PairingOutcome, PumpPosition, SerialMarker, pair_records, parse_marker};
pub use pipeline::{analyze_sheet, analyze_sheets, merge_summaries};
pub use stats::{Stats, summarize_records, summarize_units};
pub use tolerance::{check_unit, check_units, relative_delta_pct};
