//! Period discovery for the export controls.
//!
//! The export dialog offers a year picker and a month picker scoped to the
//! chosen year; the selected period is then sliced out of the collection for
//! the document generator.

use crate::record::{models::ExpenseRecord, month::MonthKey};

/// The distinct years with dated records, most recent first.
///
/// An empty or entirely undated collection yields `fallback_year` alone so
/// the year picker is never left without a valid option. Callers pass the
/// current calendar year.
pub fn available_years(records: &[ExpenseRecord], fallback_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> = records
        .iter()
        .filter_map(MonthKey::of)
        .map(|key| key.year)
        .collect();

    years.sort_unstable();
    years.dedup();
    years.reverse();

    if years.is_empty() {
        years.push(fallback_year);
    }

    years
}

/// The distinct months of `year` with dated records, January first.
pub fn months_in_year(records: &[ExpenseRecord], year: i32) -> Vec<u8> {
    let mut months: Vec<u8> = records
        .iter()
        .filter_map(MonthKey::of)
        .filter(|key| key.year == year)
        .map(|key| key.month)
        .collect();

    months.sort_unstable();
    months.dedup();

    months
}

/// The records dated within `period`, oldest first.
///
/// This is the slice handed to the document export collaborator, which lays
/// the month out chronologically.
pub fn records_in_period(records: &[ExpenseRecord], period: MonthKey) -> Vec<ExpenseRecord> {
    let mut selected: Vec<ExpenseRecord> = records
        .iter()
        .filter(|record| MonthKey::of(record) == Some(period))
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        a.occurred_at
            .cmp(&b.occurred_at)
            .then_with(|| a.row_position.cmp(&b.row_position))
    });

    selected
}

#[cfg(test)]
mod tests {
    use crate::record::{month::MonthKey, test_fixtures::dated_record};

    use super::{available_years, months_in_year, records_in_period};

    #[test]
    fn years_are_distinct_and_most_recent_first() {
        let records = vec![
            dated_record(2, "15/11/2025 10:00", 100.0),
            dated_record(3, "05/01/2026 09:00", 200.0),
            dated_record(4, "20/12/2025 10:00", 300.0),
        ];

        assert_eq!(available_years(&records, 2026), vec![2026, 2025]);
    }

    #[test]
    fn empty_collection_falls_back_to_the_current_year() {
        assert_eq!(available_years(&[], 2026), vec![2026]);
    }

    #[test]
    fn undated_records_fall_back_to_the_current_year() {
        let records = vec![dated_record(2, "sin fecha", 100.0)];

        assert_eq!(available_years(&records, 2026), vec![2026]);
    }

    #[test]
    fn months_are_distinct_ascending_and_scoped_to_the_year() {
        let records = vec![
            dated_record(2, "15/11/2025 10:00", 100.0),
            dated_record(3, "05/01/2026 09:00", 200.0),
            dated_record(4, "20/11/2025 10:00", 300.0),
            dated_record(5, "02/03/2026 10:00", 400.0),
        ];

        assert_eq!(months_in_year(&records, 2026), vec![1, 3]);
        assert_eq!(months_in_year(&records, 2025), vec![11]);
        assert_eq!(months_in_year(&records, 2024), Vec::<u8>::new());
    }

    #[test]
    fn period_slice_is_oldest_first() {
        let records = vec![
            dated_record(2, "20/01/2026 10:00", 100.0),
            dated_record(3, "05/01/2026 09:00", 200.0),
            dated_record(4, "15/02/2026 10:00", 300.0),
        ];

        let got = records_in_period(
            &records,
            MonthKey {
                year: 2026,
                month: 1,
            },
        );

        let positions: Vec<u32> = got.iter().map(|record| record.row_position).collect();
        assert_eq!(positions, vec![3, 2]);
    }
}
