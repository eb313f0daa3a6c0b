use chrono::NaiveDate;
use serde::Serialize;

use crate::claim::{ClaimTable, Field};

/// Claims received more than this many days before the reference date count as stale.
pub const STALE_AFTER_DAYS: i64 = 90;

/// Headline numbers shown above the claims table.
///
/// Always computed over the whole table, never the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub processed: usize,
    pub over_90_days: usize,
    pub oldest_received: Option<NaiveDate>,
}

pub fn summarize(table: &ClaimTable, today: NaiveDate) -> Summary {
    let mut processed = 0;
    let mut over_90_days = 0;
    let mut oldest_received: Option<NaiveDate> = None;

    for claim in table.claims() {
        if table.text(claim, Field::Status).to_lowercase() == "processed" {
            processed += 1;
        }

        if let Some(received) = table.date(claim, Field::DateReceived) {
            if (today - received).num_days() > STALE_AFTER_DAYS {
                over_90_days += 1;
            }
            oldest_received = Some(match oldest_received {
                Some(oldest) => oldest.min(received),
                None => received,
            });
        }
    }

    Summary {
        total: table.len(),
        processed,
        over_90_days,
        oldest_received,
    }
}
