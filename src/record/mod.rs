//! The expense record pipeline.
//!
//! Raw spreadsheet rows enter through [map_rows] and flow one way into the
//! filtered, sorted, and aggregated views the presentation layer consumes:
//! - [filter_records] backs the current-month list and the history view,
//! - [total], [category_totals], and [group_by_month] back the running
//!   total, the category chart, and the per-month history groups,
//! - [available_years], [months_in_year], and [records_in_period] back the
//!   export controls.

mod aggregate;
mod date;
mod export;
mod filter;
mod mapper;
mod models;
mod month;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use aggregate::{MonthBucket, category_totals, group_by_month, sort_most_recent_first, total};
pub use date::{format_display_date, parse_display_date};
pub use export::{available_years, months_in_year, records_in_period};
pub use filter::{CategoryFilter, MonthScope, RecordFilter, filter_records};
pub use mapper::{map_row, map_rows};
pub use models::{
    DEFAULT_CATEGORY, EditedExpense, ExpenseRecord, FIRST_DATA_ROW, NewExpense, RowPosition,
};
pub use month::MonthKey;
