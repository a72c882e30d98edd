//! Written QC report rendering.
//!
//! Formats `ReportSummary` values into the plain-text report QC staff file
//! with each shipment. Rendering never recomputes analysis results; every
//! number here comes straight off the summaries.

mod text;

pub use text::{ReportOptions, render_report, write_report};
