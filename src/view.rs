//! Page models for the dashboard.
//!
//! A request carries the filter inputs and an optional selected CM Number.
//! With no selection the list page is built; with one, the detail page (or a
//! not-found page when no claim carries that CM Number).

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimTable, Field};
use crate::dates::parse_date_input;
use crate::filter::{ClaimFilter, DateRange};
use crate::metrics::{Summary, summarize};

pub const NOTES_PLACEHOLDER: &str = "[Placeholder for complaint text]";

/// Labels of the disabled action buttons on the detail page.
pub const PLACEHOLDER_ACTIONS: [&str; 3] = [
    "Mark as Processed (placeholder)",
    "Send Email Response (placeholder)",
    "Analyze with GPT (disabled)",
];

const MISSING: &str = "N/A";

/// Raw query string parameters, exactly as typed into the sidebar.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ViewQuery {
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub cm_filter: Option<String>,
    #[serde(default)]
    pub received_from: Option<String>,
    #[serde(default)]
    pub received_to: Option<String>,
    /// Selected CM Number; switches the page to the detail view.
    #[serde(default)]
    pub cm: Option<String>,
}

impl ViewQuery {
    /// Filter described by the sidebar inputs. Malformed dates are dropped,
    /// which in turn disables the date range.
    pub fn filter(&self) -> ClaimFilter {
        let start = self.received_from.as_deref().and_then(parse_date_input);
        let end = self.received_to.as_deref().and_then(parse_date_input);

        ClaimFilter {
            customer_number: self.customer.clone().filter(|s| !s.is_empty()),
            cm_number: self.cm_filter.clone().filter(|s| !s.is_empty()),
            received: DateRange::from_bounds(start, end),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.cm.as_deref().filter(|cm| !cm.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CellView {
    pub text: String,
    /// Set on the CM Number column only.
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowView {
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListPage {
    pub summary: Summary,
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
    pub shown: usize,
    pub cm_options: Vec<String>,
    pub form: ViewQuery,
    /// Query string reproducing the active filters, for export links.
    pub filter_query: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailPage {
    pub cm_number: String,
    pub left: Vec<DetailField>,
    pub right: Vec<DetailField>,
    pub notes: &'static str,
    pub actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotFoundPage {
    pub cm_number: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    List(ListPage),
    Detail(DetailPage),
    NotFound(NotFoundPage),
}

/// Link that opens the detail view for a CM Number.
pub fn detail_link(cm: &str) -> String {
    format!("?cm={}", urlencoding::encode(cm))
}

/// Build the page for one request against the current table.
pub fn build_page(table: &ClaimTable, query: &ViewQuery, today: NaiveDate) -> Page {
    match query.selected() {
        Some(cm) => match detail_page(table, cm) {
            Some(page) => Page::Detail(page),
            None => {
                debug!("no claim found for CM Number '{}'", cm);
                Page::NotFound(NotFoundPage {
                    cm_number: cm.to_string(),
                    message: format!("No claim found for CM Number '{}'.", cm),
                })
            }
        },
        None => Page::List(list_page(table, query, today)),
    }
}

pub fn list_page(table: &ClaimTable, query: &ViewQuery, today: NaiveDate) -> ListPage {
    let filtered = query.filter().apply(table);
    let cm_column = table.position(Field::CmNumber);

    let rows = filtered
        .iter()
        .map(|claim| RowView {
            cells: claim
                .cells()
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    let text = value.to_string();
                    let link = (Some(idx) == cm_column && !text.is_empty())
                        .then(|| detail_link(&text));
                    CellView { text, link }
                })
                .collect(),
        })
        .collect();

    ListPage {
        summary: summarize(table, today),
        headers: table.headers().to_vec(),
        rows,
        shown: filtered.len(),
        cm_options: table.cm_options(filtered.iter().copied()),
        form: ViewQuery {
            cm: None,
            ..query.clone()
        },
        filter_query: filter_query(query),
    }
}

/// Detail of the first claim whose CM Number matches, looked up in the full table.
pub fn detail_page(table: &ClaimTable, cm: &str) -> Option<DetailPage> {
    let claim = table.find_by_cm(cm)?;
    let entry = |label, field| DetailField {
        label,
        value: display(table, claim, field),
    };

    Some(DetailPage {
        cm_number: table.text(claim, Field::CmNumber),
        left: vec![
            entry("Customer #", Field::CustomerNumber),
            entry("Claim #", Field::ClaimNumber),
            entry("Date Received", Field::DateReceived),
            entry("Status", Field::Status),
        ],
        right: vec![
            entry("Part Value", Field::PartValue),
            entry("Quantity", Field::Quantity),
            entry("RGA #", Field::RgaNumber),
            entry("Final Input", Field::FinalInput),
        ],
        notes: NOTES_PLACEHOLDER,
        actions: PLACEHOLDER_ACTIONS.to_vec(),
    })
}

fn display(table: &ClaimTable, claim: &Claim, field: Field) -> String {
    let value = table.value(claim, field);
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

fn filter_query(query: &ViewQuery) -> String {
    let active = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
    let params = ViewQuery {
        customer: active(&query.customer),
        cm_filter: active(&query.cm_filter),
        received_from: active(&query.received_from),
        received_to: active(&query.received_to),
        cm: None,
    };

    // Unset fields are left out of the query string
    serde_urlencoded::to_string(&params).unwrap_or_default()
}
