use std::path::PathBuf;

use pumpqc_model::ReportSummary;

#[derive(Debug)]
pub struct AnalysisResult {
    pub summaries: Vec<ReportSummary>,
    pub report_path: Option<PathBuf>,
    pub has_mismatches: bool,
}
