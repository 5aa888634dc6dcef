//! Helpers for building expense records in tests.

use crate::record::{
    date::parse_display_date,
    models::{DEFAULT_CATEGORY, ExpenseRecord, RowPosition},
};

/// A record with the given date cell text, default category, and no
/// description.
pub(crate) fn dated_record(
    position: RowPosition,
    display_date: &str,
    amount: f64,
) -> ExpenseRecord {
    record(position, display_date, amount, DEFAULT_CATEGORY, "")
}

/// A fully specified record, parsing `display_date` the way the mapper does.
pub(crate) fn record(
    position: RowPosition,
    display_date: &str,
    amount: f64,
    category: &str,
    description: &str,
) -> ExpenseRecord {
    ExpenseRecord {
        row_position: position,
        occurred_at: parse_display_date(display_date),
        display_date: display_date.to_owned(),
        amount,
        category: category.to_owned(),
        description: description.to_owned(),
    }
}
