pub mod bucket;
pub mod record;
pub mod summary;
pub mod tolerance;
pub mod unit;
pub mod warning;

pub use bucket::{BucketCounts, EfficiencyBucket};
pub use record::{Configuration, PumpRecord, RawRow};
pub use summary::{AmperageRange, ReportSummary};
pub use tolerance::{ToleranceResult, Tolerances};
pub use unit::TandemUnit;
pub use warning::AnalysisWarning;
