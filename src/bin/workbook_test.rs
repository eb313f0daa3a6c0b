use chrono::NaiveDate;
use claims_dashboard::claim::{ClaimTable, Field, Value};
use claims_dashboard::downloader::{to_csv, to_xlsx};
use claims_dashboard::loader::load_claims;
use claims_dashboard::view::ViewQuery;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::fs;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_load_xlsx_fixture() {
    println!("\n====== Testing XLSX load ======");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("claims_data_for_streamlit.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (c, field) in Field::ALL.iter().enumerate() {
        worksheet.write_string(0, c as u16, field.header()).unwrap();
    }
    // A1: serial date received, text claim date
    worksheet.write_number(1, 0, 1001.0).unwrap();
    worksheet.write_string(1, 1, "A1").unwrap();
    worksheet.write_number(1, 2, 5001.0).unwrap();
    worksheet.write_string(1, 3, "2023-12-20").unwrap();
    worksheet.write_number(1, 4, 45292.0).unwrap();
    worksheet.write_string(1, 5, "Processed").unwrap();
    worksheet.write_number(1, 6, 125.5).unwrap();
    // B2: month-first text date, garbage claim date, sparse columns
    worksheet.write_number(2, 0, 1002.0).unwrap();
    worksheet.write_string(2, 1, "B2").unwrap();
    worksheet.write_string(2, 3, "pending").unwrap();
    worksheet.write_string(2, 4, "06/01/2024").unwrap();
    worksheet.write_string(2, 5, "Open").unwrap();
    workbook.save(&path).unwrap();

    let table = load_claims(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.headers().len(), 10);
    println!("✓ Header row and two claims loaded");

    let a1 = &table.claims()[0];
    assert_eq!(table.text(a1, Field::CustomerNumber), "1001");
    assert_eq!(table.text(a1, Field::PartValue), "125.5");
    assert_eq!(table.date(a1, Field::ClaimDate), Some(date(2023, 12, 20)));
    assert_eq!(table.date(a1, Field::DateReceived), Some(date(2024, 1, 1)));
    println!("✓ Numbers and serial dates read from the first worksheet");

    let b2 = &table.claims()[1];
    assert_eq!(table.date(b2, Field::ClaimDate), None);
    assert_eq!(table.date(b2, Field::DateReceived), Some(date(2024, 6, 1)));
    assert_eq!(table.value(b2, Field::FinalInput), &Value::Empty);
    println!("✓ Text dates parsed, invalid date coerced to empty");
}

fn test_load_native_date_cells() {
    println!("\n====== Testing XLSX date cells ======");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dated_claims.xlsx");

    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    let claim_date = ExcelDateTime::from_ymd(2023, 12, 20).unwrap();
    let received = ExcelDateTime::from_ymd(2024, 1, 1)
        .unwrap()
        .and_hms(15, 30, 0)
        .unwrap();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "CM Number").unwrap();
    worksheet.write_string(0, 1, "Claim Date").unwrap();
    worksheet.write_string(0, 2, "Date Received").unwrap();
    worksheet.write_string(1, 0, "A1").unwrap();
    worksheet
        .write_datetime_with_format(1, 1, &claim_date, &date_format)
        .unwrap();
    worksheet
        .write_datetime_with_format(1, 2, &received, &datetime_format)
        .unwrap();
    workbook.save(&path).unwrap();

    let table = load_claims(&path).unwrap();
    assert_eq!(table.len(), 1);
    let a1 = &table.claims()[0];
    assert_eq!(table.value(a1, Field::ClaimDate), &Value::Date(date(2023, 12, 20)));
    println!("✓ Date-formatted cell read as a date");

    assert_eq!(table.date(a1, Field::DateReceived), Some(date(2024, 1, 1)));
    assert_eq!(table.text(a1, Field::DateReceived), "2024-01-01");
    println!("✓ Time of day dropped from a datetime cell");
}

// Helper function to build a small table for export
fn export_table() -> ClaimTable {
    let headers = vec![
        "CM Number".to_string(),
        "Claim Date".to_string(),
        "Date Received".to_string(),
        "Part Value".to_string(),
        "Final Input".to_string(),
    ];
    let rows = vec![
        vec![
            Value::Text("A1".to_string()),
            Value::Empty,
            Value::Text("2024-01-01".to_string()),
            Value::Number(12.5),
            Value::Text("has, comma".to_string()),
        ],
        vec![
            Value::Text("B2".to_string()),
            Value::Empty,
            Value::Text("2024-06-01".to_string()),
            Value::Number(3.0),
            Value::Text("Open".to_string()),
        ],
    ];
    ClaimTable::from_rows(headers, rows).unwrap()
}

fn test_csv_export_of_filtered_claims() {
    println!("\n====== Testing CSV export ======");
    let table = export_table();
    let query = ViewQuery {
        cm_filter: Some("A".to_string()),
        ..Default::default()
    };
    let filtered = query.filter().apply(&table);

    let csv = to_csv(&table, &filtered).unwrap();
    assert_eq!(
        csv,
        "CM Number,Claim Date,Date Received,Part Value,Final Input\n\
         A1,,2024-01-01,12.5,\"has, comma\"\n"
    );
    println!("✓ Header plus filtered rows, commas quoted");
}

fn test_xlsx_export_reloads() {
    println!("\n====== Testing XLSX export ======");
    let table = export_table();
    let all: Vec<_> = table.claims().iter().collect();

    let bytes = to_xlsx(&table, &all).unwrap();
    assert!(bytes.starts_with(b"PK"), "XLSX is a zip container");
    println!("✓ Export produced a zip container");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.xlsx");
    fs::write(&path, &bytes).unwrap();

    let reloaded = load_claims(&path).unwrap();
    assert_eq!(reloaded.headers(), table.headers());
    assert_eq!(reloaded.len(), 2);
    let b2 = &reloaded.claims()[1];
    assert_eq!(reloaded.text(b2, Field::CmNumber), "B2");
    assert_eq!(reloaded.value(b2, Field::PartValue), &Value::Number(3.0));
    assert_eq!(reloaded.date(b2, Field::DateReceived), Some(date(2024, 6, 1)));
    println!("✓ Exported workbook opens with the same columns and values");
}

fn main() {
    test_load_xlsx_fixture();
    test_load_native_date_cells();
    test_csv_export_of_filtered_claims();
    test_xlsx_export_reloads();
    println!("\nAll workbook tests passed");
}

#[cfg(test)]
mod tests {
    #[test]
    fn load_xlsx_fixture() {
        super::test_load_xlsx_fixture();
    }

    #[test]
    fn load_native_date_cells() {
        super::test_load_native_date_cells();
    }

    #[test]
    fn csv_export_of_filtered_claims() {
        super::test_csv_export_of_filtered_claims();
    }

    #[test]
    fn xlsx_export_reloads() {
        super::test_xlsx_export_reloads();
    }
}
