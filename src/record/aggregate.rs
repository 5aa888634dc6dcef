//! Totals, category breakdowns, and month grouping over record collections.
//!
//! Every function here is a pure read over its input: aggregates are
//! recomputed from scratch on each load or filter cycle and never patched in
//! place.

use std::{cmp::Ordering, collections::HashMap};

use crate::record::{models::ExpenseRecord, month::MonthKey};

/// The records of one calendar month together with their amount subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    /// The calendar month shared by every record in the bucket.
    pub key: MonthKey,

    /// The bucket's records, most recent first.
    pub records: Vec<ExpenseRecord>,

    /// Sum of the bucket's amounts.
    pub total: f64,
}

/// Sum of amounts over `records`. Zero for an empty collection.
pub fn total(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}

/// Per-category amount sums over `records`.
///
/// Categories with no records have no entry, so callers can tell "nothing
/// spent" apart from "category not present".
pub fn category_totals(records: &[ExpenseRecord]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for record in records {
        *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
    }

    totals
}

/// Partition `records` into per-month buckets, most recent month first.
///
/// Records within a bucket are ordered most recent first and each bucket
/// carries its own subtotal. Undated records belong to no bucket and are
/// left out.
pub fn group_by_month(records: &[ExpenseRecord]) -> Vec<MonthBucket> {
    let mut records_by_month: HashMap<MonthKey, Vec<ExpenseRecord>> = HashMap::new();

    for record in records {
        if let Some(key) = MonthKey::of(record) {
            records_by_month.entry(key).or_default().push(record.clone());
        }
    }

    let mut buckets: Vec<MonthBucket> = records_by_month
        .into_iter()
        .map(|(key, mut records)| {
            sort_most_recent_first(&mut records);
            let total = total(&records);

            MonthBucket {
                key,
                records,
                total,
            }
        })
        .collect();

    buckets.sort_by(|a, b| b.key.cmp(&a.key));

    buckets
}

/// Order `records` by date, most recent first.
///
/// Undated records sort last. Row position breaks ties, later rows first,
/// so records added the same minute keep a stable order across reloads.
pub fn sort_most_recent_first(records: &mut [ExpenseRecord]) {
    records.sort_by(|a, b| match (a.occurred_at, b.occurred_at) {
        (Some(a_date), Some(b_date)) => b_date
            .cmp(&a_date)
            .then_with(|| b.row_position.cmp(&a.row_position)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.row_position.cmp(&a.row_position),
    });
}
