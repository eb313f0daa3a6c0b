use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::dates::coerce_date;
use crate::error::ClaimsError;

/// A single spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }
}

/// The string form used for substring filters, lookups and display.
///
/// Integral numbers print without a fractional part so that a customer number
/// stored as `1001.0` in the workbook still reads and matches as `1001`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(text) => f.write_str(text),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Columns the dashboard knows by their exact header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CustomerNumber,
    CmNumber,
    ClaimNumber,
    ClaimDate,
    DateReceived,
    Status,
    PartValue,
    Quantity,
    RgaNumber,
    FinalInput,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::CustomerNumber,
        Field::CmNumber,
        Field::ClaimNumber,
        Field::ClaimDate,
        Field::DateReceived,
        Field::Status,
        Field::PartValue,
        Field::Quantity,
        Field::RgaNumber,
        Field::FinalInput,
    ];

    /// Columns without which the table cannot be served.
    pub const REQUIRED: [Field; 3] = [Field::CmNumber, Field::ClaimDate, Field::DateReceived];

    pub fn header(self) -> &'static str {
        match self {
            Field::CustomerNumber => "Customer Number",
            Field::CmNumber => "CM Number",
            Field::ClaimNumber => "Claim Number",
            Field::ClaimDate => "Claim Date",
            Field::DateReceived => "Date Received",
            Field::Status => "Status",
            Field::PartValue => "Part Value",
            Field::Quantity => "Quantity",
            Field::RgaNumber => "RGA Number",
            Field::FinalInput => "Final Input",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::ClaimDate | Field::DateReceived)
    }
}

/// One row of the claims sheet, with every original column in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    cells: Vec<Value>,
}

impl Claim {
    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}

static EMPTY: Value = Value::Empty;

/// The loaded claims sheet. Read-only once built.
#[derive(Debug, Clone)]
pub struct ClaimTable {
    headers: Vec<String>,
    claims: Vec<Claim>,
    positions: HashMap<Field, usize>,
}

impl ClaimTable {
    /// Build a table from a header row and raw data rows.
    ///
    /// Rows are padded or truncated to the header width, fully empty rows are
    /// dropped, and both date columns are coerced (unparsable cells become empty).
    ///
    /// # Errors
    /// * `ClaimsError::MissingColumn` if a required column is absent
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, ClaimsError> {
        let mut positions = HashMap::new();
        for field in Field::ALL {
            // First occurrence wins when a header is repeated
            if let Some(idx) = headers.iter().position(|h| h == field.header()) {
                positions.insert(field, idx);
            }
        }

        for field in Field::REQUIRED {
            if !positions.contains_key(&field) {
                return Err(ClaimsError::MissingColumn(field.header().to_string()));
            }
        }

        let date_columns: Vec<usize> = Field::ALL
            .iter()
            .filter(|f| f.is_date())
            .filter_map(|f| positions.get(f).copied())
            .collect();

        let width = headers.len();
        let claims = rows
            .into_iter()
            .filter(|row| row.iter().any(|v| !v.is_empty()))
            .map(|mut cells| {
                cells.resize(width, Value::Empty);
                for &idx in &date_columns {
                    let raw = std::mem::replace(&mut cells[idx], Value::Empty);
                    cells[idx] = coerce_date(raw);
                }
                Claim { cells }
            })
            .collect();

        Ok(ClaimTable {
            headers,
            claims,
            positions,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.positions.contains_key(&field)
    }

    /// Column index of a known field, if present in the header row.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    /// Value of a known field for a claim; empty when the column is absent.
    pub fn value<'a>(&self, claim: &'a Claim, field: Field) -> &'a Value {
        self.positions
            .get(&field)
            .and_then(|&idx| claim.cells.get(idx))
            .unwrap_or(&EMPTY)
    }

    /// String form of a known field.
    pub fn text(&self, claim: &Claim, field: Field) -> String {
        self.value(claim, field).to_string()
    }

    pub fn date(&self, claim: &Claim, field: Field) -> Option<NaiveDate> {
        self.value(claim, field).as_date()
    }

    /// First claim whose CM Number string form equals `cm`.
    ///
    /// CM Numbers are not checked for uniqueness; later duplicates are unreachable here.
    pub fn find_by_cm(&self, cm: &str) -> Option<&Claim> {
        self.claims
            .iter()
            .find(|claim| self.text(claim, Field::CmNumber) == cm)
    }

    /// Distinct, non-empty CM Numbers of `claims` in first-appearance order.
    pub fn cm_options<'a>(&self, claims: impl IntoIterator<Item = &'a Claim>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        claims
            .into_iter()
            .map(|claim| self.text(claim, Field::CmNumber))
            .filter(|cm| !cm.is_empty() && seen.insert(cm.clone()))
            .collect()
    }
}
