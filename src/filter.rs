//! Sidebar filters over the claims table.
//!
//! Every filter is independent and the active ones are combined with AND.
//! An absent or empty input never narrows the result.

use chrono::NaiveDate;

use crate::claim::{Claim, ClaimTable, Field};

/// Inclusive range of whole days on "Date Received".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Only a two-sided range is a filter; a one-sided range is ignored.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFilter {
    /// Case-sensitive substring of the Customer Number string form.
    pub customer_number: Option<String>,
    /// Case-sensitive substring of the CM Number string form.
    pub cm_number: Option<String>,
    pub received: Option<DateRange>,
}

impl ClaimFilter {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.customer_number).is_none()
            && non_empty(&self.cm_number).is_none()
            && self.received.is_none()
    }

    pub fn matches(&self, table: &ClaimTable, claim: &Claim) -> bool {
        if let Some(needle) = non_empty(&self.customer_number) {
            if !table.text(claim, Field::CustomerNumber).contains(needle) {
                return false;
            }
        }

        if let Some(needle) = non_empty(&self.cm_number) {
            if !table.text(claim, Field::CmNumber).contains(needle) {
                return false;
            }
        }

        if let Some(range) = &self.received {
            // Null dates never fall inside an active range
            match table.date(claim, Field::DateReceived) {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        true
    }

    /// Matching claims in original row order.
    pub fn apply<'a>(&self, table: &'a ClaimTable) -> Vec<&'a Claim> {
        table
            .claims()
            .iter()
            .filter(|claim| self.matches(table, claim))
            .collect()
    }
}

fn non_empty(input: &Option<String>) -> Option<&str> {
    input.as_deref().filter(|s| !s.is_empty())
}
