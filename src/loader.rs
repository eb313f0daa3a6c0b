use calamine::{Data, Reader, open_workbook_auto};
use log::{debug, info};
use std::path::Path;

use crate::claim::{ClaimTable, Value};
use crate::error::ClaimsError;

/// Load the claims sheet from a CSV file
///
/// The first record is the header row. Numeric-looking fields become numbers,
/// blank fields become empty cells and everything else is kept as text.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<ClaimTable, ClaimsError>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use claims_dashboard::loader::from_csv;
///
/// match from_csv("claims.csv") {
///     Ok(table) => println!("Loaded {} claims", table.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<ClaimTable, ClaimsError> {
    let path = filepath.as_ref();
    let csv_err = |source| ClaimsError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let header_record = reader.headers().map_err(csv_err)?.clone();
    if header_record.is_empty() {
        return Err(ClaimsError::EmptySheet(path.display().to_string()));
    }
    let headers: Vec<String> = header_record
        .iter()
        .enumerate()
        .map(|(idx, h)| header_name(idx, h))
        .collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(csv_value).collect());
    }

    ClaimTable::from_rows(headers, rows)
}

/// Load the claims sheet from a workbook (XLSX, XLSM, XLS or ODS)
///
/// Only the first worksheet is read. Native date cells are kept as dates,
/// error cells become empty.
///
/// # Arguments
/// * `filepath` - Path to the workbook to load
///
/// # Returns
/// * `Result<ClaimTable, ClaimsError>` - The loaded table or an error
pub fn from_excel(filepath: impl AsRef<Path>) -> Result<ClaimTable, ClaimsError> {
    let path = filepath.as_ref();
    let workbook_err = |source| ClaimsError::Workbook {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;

    // Get the first worksheet
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ClaimsError::NoWorksheet(path.display().to_string()))?;
    debug!("reading worksheet '{}' from {}", sheet_name, path.display());

    let range = workbook.worksheet_range(&sheet_name).map_err(workbook_err)?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ClaimsError::EmptySheet(path.display().to_string()))?;
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(idx, &cell_value(cell).to_string()))
        .collect();

    let data: Vec<Vec<Value>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    ClaimTable::from_rows(headers, data)
}

/// Detect file type and load the appropriate format
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<ClaimTable, ClaimsError>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use claims_dashboard::loader::load_claims;
///
/// match load_claims("claims_data_for_streamlit.xlsx") {
///     Ok(table) => println!("Successfully loaded {} claims", table.len()),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_claims(filepath: impl AsRef<Path>) -> Result<ClaimTable, ClaimsError> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let table = match extension.as_deref() {
        Some("csv") => from_csv(path)?,
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => from_excel(path)?,
        Some(ext) => return Err(ClaimsError::UnsupportedFormat(ext.to_string())),
        None => return Err(ClaimsError::UnsupportedFormat("(none)".to_string())),
    };

    info!("loaded {} claims from {}", table.len(), path.display());
    Ok(table)
}

fn header_name(idx: usize, raw: &str) -> String {
    if raw.is_empty() {
        format!("Unnamed: {}", idx)
    } else {
        raw.to_string()
    }
}

fn csv_value(field: &str) -> Value {
    if field.trim().is_empty() {
        return Value::Empty;
    }
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(field.to_string()),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Empty,
        Data::String(s) if s.is_empty() => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Value::Date(datetime.date()),
            None => Value::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match crate::dates::parse_date_text(s) {
            Some(date) => Value::Date(date),
            None => Value::Text(s.clone()),
        },
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
