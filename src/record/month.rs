//! Calendar month bucketing for expense records.

use std::fmt::Display;

use time::PrimitiveDateTime;

use crate::record::models::ExpenseRecord;

/// A calendar year and month, the bucket key for every month-based view.
///
/// Keys order chronologically and display as `MM/YYYY`, the period label
/// used by the export controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u8,
}

impl MonthKey {
    /// The bucket key for `date_time`'s calendar month.
    pub fn from_date_time(date_time: PrimitiveDateTime) -> Self {
        Self {
            year: date_time.year(),
            month: date_time.month() as u8,
        }
    }

    /// The bucket key for `record`, or `None` when the record is undated.
    ///
    /// Two records dated anywhere within the same calendar month share a
    /// key, regardless of day or time. Records without a key belong to no
    /// bucket and are excluded from every month-based view.
    pub fn of(record: &ExpenseRecord) -> Option<Self> {
        record.occurred_at.map(Self::from_date_time)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
