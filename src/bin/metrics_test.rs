use chrono::NaiveDate;
use claims_dashboard::claim::{ClaimTable, Value};
use claims_dashboard::metrics::{Summary, summarize};
use claims_dashboard::view::{ViewQuery, list_page};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Helper function to build a table of (cm, status, date received) rows
fn table_of(rows: &[(&str, &str, &str)]) -> ClaimTable {
    let headers = vec![
        "CM Number".to_string(),
        "Status".to_string(),
        "Claim Date".to_string(),
        "Date Received".to_string(),
    ];
    let cell = |s: &str| {
        if s.is_empty() {
            Value::Empty
        } else {
            Value::Text(s.to_string())
        }
    };
    let rows = rows
        .iter()
        .map(|(cm, status, received)| vec![cell(*cm), cell(*status), Value::Empty, cell(*received)])
        .collect();

    ClaimTable::from_rows(headers, rows).unwrap()
}

fn test_reference_example() {
    println!("\n====== Testing reference example ======");
    let table = table_of(&[("A1", "Processed", "2024-01-01"), ("B2", "Open", "2024-06-01")]);
    let summary = summarize(&table, date(2024, 7, 1));

    assert_eq!(
        summary,
        Summary {
            total: 2,
            processed: 1,
            over_90_days: 1,
            oldest_received: Some(date(2024, 1, 1)),
        }
    );
    println!("✓ Total=2, Processed=1, >90 days=1, Oldest=2024-01-01");
}

fn test_processed_is_case_insensitive_equality() {
    println!("\n====== Testing processed count ======");
    let table = table_of(&[
        ("A", "processed", "2024-01-01"),
        ("B", "PROCESSED", "2024-01-01"),
        ("C", "Processed ", "2024-01-01"),
        ("D", "Unprocessed", "2024-01-01"),
        ("E", "", "2024-01-01"),
    ]);
    assert_eq!(summarize(&table, date(2024, 1, 2)).processed, 2);
    println!("✓ Only exact case-insensitive 'processed' counts");
}

fn test_ninety_day_boundary() {
    println!("\n====== Testing 90 day boundary ======");
    let today = date(2024, 7, 1);
    let table = table_of(&[
        ("exactly-90", "Open", "2024-04-02"),
        ("91-days", "Open", "2024-04-01"),
        ("no-date", "Open", ""),
        ("bad-date", "Open", "someday"),
    ]);
    assert_eq!((today - date(2024, 4, 2)).num_days(), 90);

    let summary = summarize(&table, today);
    assert_eq!(summary.over_90_days, 1);
    assert_eq!(summary.oldest_received, Some(date(2024, 4, 1)));
    assert_eq!(summary.total, 4);
    println!("✓ 90 days is not stale, 91 is; null dates excluded");
}

fn test_empty_table() {
    println!("\n====== Testing empty table ======");
    let table = table_of(&[]);
    let summary = summarize(&table, date(2024, 7, 1));
    assert_eq!(summary.total, 0);
    assert_eq!(summary.oldest_received, None);
    println!("✓ No rows, no oldest claim");
}

fn test_summary_ignores_filters() {
    println!("\n====== Testing summary over unfiltered table ======");
    let table = table_of(&[("A1", "Processed", "2024-01-01"), ("B2", "Open", "2024-06-01")]);
    let query = ViewQuery {
        cm_filter: Some("B2".to_string()),
        ..Default::default()
    };
    let page = list_page(&table, &query, date(2024, 7, 1));

    assert_eq!(page.shown, 1);
    assert_eq!(page.summary.total, 2);
    assert_eq!(page.summary.processed, 1);
    println!("✓ Filter narrows the list but not the metrics");
}

fn main() {
    test_reference_example();
    test_processed_is_case_insensitive_equality();
    test_ninety_day_boundary();
    test_empty_table();
    test_summary_ignores_filters();
    println!("\nAll metrics tests passed");
}

#[cfg(test)]
mod tests {
    #[test]
    fn reference_example() {
        super::test_reference_example();
    }

    #[test]
    fn processed_is_case_insensitive_equality() {
        super::test_processed_is_case_insensitive_equality();
    }

    #[test]
    fn ninety_day_boundary() {
        super::test_ninety_day_boundary();
    }

    #[test]
    fn empty_table() {
        super::test_empty_table();
    }

    #[test]
    fn summary_ignores_filters() {
        super::test_summary_ignores_filters();
    }
}
