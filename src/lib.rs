/*!
# Warranty Claims Dashboard

A browser-based dashboard for reviewing warranty claims kept in a spreadsheet,
built in Rust.

## Overview

The claims sheet is loaded once into memory and served to every request as a
read-only snapshot. Each request is an ordinary function of
`(snapshot, filter inputs, optional selected CM Number)` that produces a page
model, which is then rendered to HTML.

## Architecture

### Data Layer
- **loader**: Reads XLSX/XLS/ODS workbooks and CSV files, coercing
  "Claim Date" and "Date Received" to dates (unparsable cells become empty)
- **claim**: The claims table, cell values and the known columns
- **store**: Holds the snapshot and swaps it on explicit refresh

### Logic Layer
- **filter**: Customer Number / CM Number substring filters and the
  Date Received range, combined with AND
- **metrics**: Totals, processed count, claims older than 90 days and the
  oldest claim, always over the unfiltered table
- **view**: List, detail and not-found page models

### Web Layer (`web` feature)
- **render**: Handlebars templates for every page
- **downloader**: CSV and XLSX export of the filtered list
- **app**: Routing, JSON API and refresh

## REST API Endpoints

- `/` - List page, or the detail page when `?cm=` is present
- `/api/claims` - Filtered claims with summary metrics
- `/api/claims/{cm}` - One claim by CM Number
- `/api/summary` - Summary metrics
- `/export.csv`, `/export.xlsx` - Filtered download
- `/refresh` - Reload the spreadsheet (POST)
*/

pub mod claim;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod store;
pub mod view;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod downloader;
#[cfg(feature = "web")]
pub mod render;

pub use claim::{Claim, ClaimTable, Field, Value};
pub use error::ClaimsError;
pub use filter::{ClaimFilter, DateRange};
pub use metrics::{Summary, summarize};
pub use view::{Page, ViewQuery, build_page};
