//! Maps raw spreadsheet rows onto expense records.
//!
//! This is the only place that sees the loosely-shaped cell data the sheet
//! returns; everything downstream works with [ExpenseRecord]. Mapping is
//! lossy: cells that fail to parse fall back to documented defaults instead
//! of dropping the record or raising an error.

use crate::{
    record::{
        date::parse_display_date,
        models::{DEFAULT_CATEGORY, ExpenseRecord, FIRST_DATA_ROW, RowPosition},
    },
    store::RawRow,
};

/// Convert the `index`-th data row of the sheet into an [ExpenseRecord].
///
/// `index` is 0-based within the data range; the resulting row position
/// accounts for the header row and the sheet's 1-based addressing, so the
/// first data row maps to position 2.
///
/// Defaults for missing or bad cells: an unparseable date leaves the record
/// undated (the raw text is kept for display), a missing, non-numeric, or
/// negative amount becomes 0, a missing category becomes
/// [DEFAULT_CATEGORY], and a missing description becomes the empty string.
pub fn map_row(index: usize, row: RawRow) -> ExpenseRecord {
    let display_date = row.date.unwrap_or_default();
    let occurred_at = parse_display_date(&display_date);

    let category = match row.category {
        Some(category) if !category.is_empty() => category,
        _ => DEFAULT_CATEGORY.to_owned(),
    };

    ExpenseRecord {
        row_position: index as RowPosition + FIRST_DATA_ROW,
        occurred_at,
        display_date,
        amount: parse_amount(row.amount.as_deref()),
        category,
        description: row.description.unwrap_or_default(),
    }
}

/// Convert a fetched sheet into a record collection, in sheet order.
///
/// Row positions are assigned before blank rows are dropped, so a cleared
/// (logically deleted) row in the middle of the sheet does not shift the
/// positions of the rows after it.
pub fn map_rows(rows: Vec<RawRow>) -> Vec<ExpenseRecord> {
    let records: Vec<ExpenseRecord> = rows
        .into_iter()
        .enumerate()
        .filter(|(_, row)| !row.is_blank())
        .map(|(index, row)| map_row(index, row))
        .collect();

    let undated = records
        .iter()
        .filter(|record| record.occurred_at.is_none())
        .count();

    if undated > 0 {
        tracing::debug!(
            "{undated} of {} records have an unparseable date and will be \
             hidden from month views",
            records.len()
        );
    }

    records
}

fn parse_amount(cell: Option<&str>) -> f64 {
    let Some(text) = cell else {
        return 0.0;
    };

    match text.trim().parse::<f64>() {
        Ok(amount) if amount >= 0.0 => amount,
        _ => 0.0,
    }
}
