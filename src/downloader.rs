#![cfg(feature = "web")]

use crate::claim::{Claim, ClaimTable, Value};
use crate::error::ClaimsError;

/// Convert claims to CSV format
///
/// Writes the table's header row followed by one record per claim, using
/// the same string form the dashboard displays (dates as `YYYY-MM-DD`).
/// Quoting of commas, quotes and newlines is handled by the CSV writer.
///
/// # Arguments
/// * `table` - Table the claims belong to (supplies the header row)
/// * `claims` - Claims to export, usually the filtered list
///
/// # Returns
/// * `Result<String, ClaimsError>` - CSV content as a string or an error
///
/// # Examples
/// ```no_run
/// use claims_dashboard::downloader::to_csv;
/// use claims_dashboard::loader::load_claims;
///
/// let table = load_claims("claims.xlsx").unwrap();
/// let all: Vec<_> = table.claims().iter().collect();
/// match to_csv(&table, &all) {
///     Ok(csv) => println!("CSV generated: {} bytes", csv.len()),
///     Err(e) => eprintln!("Failed to generate CSV: {}", e),
/// }
/// ```
pub fn to_csv(table: &ClaimTable, claims: &[&Claim]) -> Result<String, ClaimsError> {
    let export_err = |e: &dyn std::fmt::Display| ClaimsError::Export(e.to_string());

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.headers())
        .map_err(|e| export_err(&e))?;

    for claim in claims {
        writer
            .write_record(claim.cells().iter().map(|v| v.to_string()))
            .map_err(|e| export_err(&e))?;
    }

    let bytes = writer.into_inner().map_err(|e| export_err(&e))?;
    String::from_utf8(bytes).map_err(|e| export_err(&e))
}

/// Convert claims to XLSX format
///
/// Numbers and booleans keep their cell type; dates are written as
/// `YYYY-MM-DD` text so they read the same as on the dashboard.
///
/// # Arguments
/// * `table` - Table the claims belong to (supplies the header row)
/// * `claims` - Claims to export
///
/// # Returns
/// * `Result<Vec<u8>, ClaimsError>` - XLSX file content as bytes or an error
pub fn to_xlsx(table: &ClaimTable, claims: &[&Claim]) -> Result<Vec<u8>, ClaimsError> {
    build_workbook(table, claims).map_err(|e| ClaimsError::Export(e.to_string()))
}

fn build_workbook(
    table: &ClaimTable,
    claims: &[&Claim],
) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Claims")?;

    for (c, header) in table.headers().iter().enumerate() {
        worksheet.write_string(0, c as u16, header.as_str())?;
    }

    for (r, claim) in claims.iter().enumerate() {
        let row = (r + 1) as u32;
        for (c, value) in claim.cells().iter().enumerate() {
            let col = c as u16;
            match value {
                Value::Empty => {}
                Value::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Value::Text(_) | Value::Date(_) => {
                    worksheet.write_string(row, col, value.to_string().as_str())?;
                }
            }
        }
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}
