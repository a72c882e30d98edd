use tempfile::TempDir;

use pumpqc_ingest::{discover_sheets, load_sheets, normalize_rows, read_csv_table};

const BANNERED_SHEET: &str = "\
VBC HYDRAULICS,,\n\
Customer,Customer XYZ,\n\
Order No.,ORD-1234,\n\
,,\n\
Pump Sr. No,Eff%,Amp\n\
12345-P1,93.2,10.1\n\
12345-P2,94.0,10.4\n\
,,\n\
67890-P1,91.5,9.8\n";

#[test]
fn reads_table_below_company_banner() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("TandemPump.csv");
    std::fs::write(&path, BANNERED_SHEET).unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers, vec!["Pump Sr. No", "Eff%", "Amp"]);
    // The blank line inside the grid is dropped, not kept as an empty row.
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0].get("Pump Sr. No").unwrap(), "12345-P1");
    assert_eq!(table.rows[2].get("Amp").unwrap(), "9.8");
}

#[test]
fn empty_sheet_loads_as_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Empty.csv");
    std::fs::write(&path, "").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert!(table.is_empty());
    assert!(table.headers.is_empty());
}

#[test]
fn discovery_to_normalization_round() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("TandemPump.csv"), BANNERED_SHEET).unwrap();
    std::fs::write(
        dir.path().join("SinglePump.csv"),
        "Serial,Efficiency,Current\nS-1,92.5,8.8\nS-2,bad,8.8\n",
    )
    .unwrap();

    let sources = discover_sheets(dir.path()).unwrap();
    let sheets = load_sheets(&sources).unwrap();
    assert_eq!(sheets.len(), 2);

    let (single_label, single_rows) = &sheets[0];
    assert_eq!(single_label, "SinglePump");
    let normalized = normalize_rows(single_rows, single_label);
    assert_eq!(normalized.records.len(), 1);
    assert_eq!(normalized.skipped, 1);

    let (tandem_label, tandem_rows) = &sheets[1];
    assert_eq!(tandem_label, "TandemPump");
    let normalized = normalize_rows(tandem_rows, tandem_label);
    assert_eq!(normalized.records.len(), 3);
    assert_eq!(normalized.skipped, 0);
}
