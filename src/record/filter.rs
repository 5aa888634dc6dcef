//! Record filtering for the current and history views.
//!
//! A filter is the conjunction of three predicates: a case-insensitive
//! search over descriptions, a category restriction, and a month scope.
//! Filtering never sorts; callers order the result themselves so the
//! predicates stay independent of presentation order.

use crate::record::{models::ExpenseRecord, month::MonthKey};

/// Which categories a filter accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryFilter {
    /// Accept every category.
    All,
    /// Accept only records whose category equals the given label exactly.
    Named(String),
}

/// Which calendar months a filter accepts.
///
/// The two modes back the two list views: the main list shows the current
/// calendar month, the history view shows everything outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthScope {
    /// Accept records dated within the given month.
    In(MonthKey),
    /// Accept records dated outside the given month.
    NotIn(MonthKey),
}

/// The predicates applied, together, to a record collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    /// Substring to look for in record descriptions, case-insensitively.
    /// The empty string matches everything.
    pub search: String,

    /// The category restriction.
    pub category: CategoryFilter,

    /// The month restriction.
    pub scope: MonthScope,
}

impl RecordFilter {
    /// Whether `record` satisfies all of the filter's predicates.
    ///
    /// Undated records have no month and therefore fail both [MonthScope]
    /// modes.
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        self.matches_scope(record) && self.matches_search(record) && self.matches_category(record)
    }

    fn matches_scope(&self, record: &ExpenseRecord) -> bool {
        match (MonthKey::of(record), self.scope) {
            (None, _) => false,
            (Some(key), MonthScope::In(month)) => key == month,
            (Some(key), MonthScope::NotIn(month)) => key != month,
        }
    }

    fn matches_search(&self, record: &ExpenseRecord) -> bool {
        record
            .description
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    fn matches_category(&self, record: &ExpenseRecord) -> bool {
        match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Named(category) => record.category == *category,
        }
    }
}

/// The records in `records` that satisfy `filter`, in their original order.
pub fn filter_records(records: &[ExpenseRecord], filter: &RecordFilter) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}
