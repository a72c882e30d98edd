pub mod discovery;
pub mod error;
pub mod normalize;
pub mod table;

pub use discovery::{SheetSource, discover_sheets, load_sheets};
pub use error::{IngestError, Result};
pub use normalize::{NormalizedRows, normalize_rows, recognized_aliases};
pub use table::{CsvTable, read_csv_table};
