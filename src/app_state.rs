//! Implements the session state that owns the loaded record collection.

use std::collections::HashMap;

use time::PrimitiveDateTime;

use crate::{
    Error,
    record::{
        CategoryFilter, EditedExpense, ExpenseRecord, MonthBucket, MonthKey, MonthScope,
        NewExpense, RecordFilter, RowPosition, category_totals, filter_records,
        format_display_date, group_by_month, map_rows, records_in_period,
        sort_most_recent_first, total,
    },
    store::{ExpenseStore, RawRow},
    timezone,
};

/// The current-month list handed to the list renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseListView {
    /// The matching records, most recent first.
    pub records: Vec<ExpenseRecord>,

    /// Sum of the matching records' amounts.
    pub total: f64,

    /// Per-category sums of the matching records, for the chart renderer.
    /// Categories without a matching record have no entry.
    pub by_category: HashMap<String, f64>,
}

/// One month's records and total, handed to the document export
/// collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportView {
    /// The exported period.
    pub period: MonthKey,

    /// The period's records, oldest first.
    pub records: Vec<ExpenseRecord>,

    /// Sum of the period's amounts.
    pub total: f64,
}

/// The state of one signed-in session.
///
/// Owns the in-memory record collection, replacing the global variables the
/// views used to share. The collection is only ever replaced wholesale by a
/// successful [reload](AppState::reload); edits and deletes write to the
/// store and then reload, so presentation code always reads a frozen
/// snapshot.
#[derive(Debug, Clone)]
pub struct AppState<S: ExpenseStore> {
    store: S,
    local_timezone: String,
    records: Vec<ExpenseRecord>,
}

impl<S: ExpenseStore> AppState<S> {
    /// Create a session over `store` with an empty record collection.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "America/Bogota". It anchors the "current month" that splits the main
    /// list from the history view.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the timezone name is unknown.
    pub fn new(store: S, local_timezone: &str) -> Result<Self, Error> {
        timezone::local_now(local_timezone)?;

        Ok(Self {
            store,
            local_timezone: local_timezone.to_owned(),
            records: Vec::new(),
        })
    }

    /// The loaded record collection, in sheet order.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Fetch the sheet and replace the record collection wholesale.
    ///
    /// # Errors
    /// Returns [Error::Unauthorized] or [Error::Store] when the fetch fails.
    /// In both cases the previously loaded collection is kept, so a failed
    /// fetch never regresses a working view to empty.
    pub async fn reload(&mut self) -> Result<(), Error> {
        let rows = self.store.fetch_rows().await?;

        self.records = map_rows(rows);
        tracing::info!("loaded {} expense records", self.records.len());

        Ok(())
    }

    /// Append a new expense dated now, then reload.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the session's timezone has become
    /// unknown, or [Error::Unauthorized]/[Error::Store] when the write or
    /// the reload fails.
    pub async fn add(&mut self, expense: NewExpense) -> Result<(), Error> {
        let now = self.local_now()?;
        let row = RawRow {
            date: Some(format_display_date(now)),
            amount: Some(format_amount_cell(expense.amount)),
            category: Some(expense.category),
            description: Some(expense.description),
        };

        self.store.append_row(row).await?;
        tracing::info!("appended a new expense");

        self.reload().await
    }

    /// Overwrite the expense at `position`, then reload.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingExpense] if no loaded record has that
    /// row position, or [Error::Unauthorized]/[Error::Store] when the write
    /// or the reload fails.
    pub async fn update(
        &mut self,
        position: RowPosition,
        expense: EditedExpense,
    ) -> Result<(), Error> {
        if !self.has_record_at(position) {
            return Err(Error::UpdateMissingExpense(position));
        }

        let row = RawRow {
            date: Some(format_display_date(expense.occurred_at)),
            amount: Some(format_amount_cell(expense.amount)),
            category: Some(expense.category),
            description: Some(expense.description),
        };

        self.store.update_row(position, row).await?;
        tracing::info!("updated the expense at row {position}");

        self.reload().await
    }

    /// Clear the expense at `position`, then reload.
    ///
    /// The physical row stays in the sheet, so the row positions of the
    /// other records are the same after the reload.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingExpense] if no loaded record has that
    /// row position, or [Error::Unauthorized]/[Error::Store] when the write
    /// or the reload fails.
    pub async fn delete(&mut self, position: RowPosition) -> Result<(), Error> {
        if !self.has_record_at(position) {
            return Err(Error::DeleteMissingExpense(position));
        }

        self.store.clear_row(position).await?;
        tracing::info!("cleared the expense at row {position}");

        self.reload().await
    }

    /// The current calendar month's records, filtered, sorted most recent
    /// first, and aggregated for the list renderer.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the session's timezone has become
    /// unknown.
    pub fn current_view(
        &self,
        search: &str,
        category: CategoryFilter,
    ) -> Result<ExpenseListView, Error> {
        let filter = RecordFilter {
            search: search.to_owned(),
            category,
            scope: MonthScope::In(self.current_month()?),
        };

        let mut records = filter_records(&self.records, &filter);
        sort_most_recent_first(&mut records);

        Ok(ExpenseListView {
            total: total(&records),
            by_category: category_totals(&records),
            records,
        })
    }

    /// Past months' records grouped per month, most recent month first, for
    /// the history view.
    ///
    /// The current calendar month is left out; it belongs to the main list.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the session's timezone has become
    /// unknown.
    pub fn history_view(&self) -> Result<Vec<MonthBucket>, Error> {
        let filter = RecordFilter {
            search: String::new(),
            category: CategoryFilter::All,
            scope: MonthScope::NotIn(self.current_month()?),
        };

        let records = filter_records(&self.records, &filter);

        Ok(group_by_month(&records))
    }

    /// The years offered by the export control, most recent first.
    ///
    /// Never empty: an unloaded or undated collection yields the current
    /// calendar year alone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the session's timezone has become
    /// unknown.
    pub fn export_years(&self) -> Result<Vec<i32>, Error> {
        Ok(crate::record::available_years(
            &self.records,
            self.current_month()?.year,
        ))
    }

    /// The months of `year` offered by the export control, January first.
    pub fn export_months(&self, year: i32) -> Vec<u8> {
        crate::record::months_in_year(&self.records, year)
    }

    /// One month's records and total for the document export collaborator.
    pub fn export_view(&self, period: MonthKey) -> ExportView {
        let records = records_in_period(&self.records, period);

        ExportView {
            period,
            total: total(&records),
            records,
        }
    }

    fn current_month(&self) -> Result<MonthKey, Error> {
        Ok(MonthKey::from_date_time(self.local_now()?))
    }

    fn local_now(&self) -> Result<PrimitiveDateTime, Error> {
        timezone::local_now(&self.local_timezone)
    }

    fn has_record_at(&self, position: RowPosition) -> bool {
        self.records
            .iter()
            .any(|record| record.row_position == position)
    }
}

/// Format an amount as the text the sheet stores, without a trailing `.0`
/// for whole amounts.
fn format_amount_cell(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        record::{
            CategoryFilter, EditedExpense, FIRST_DATA_ROW, MonthKey, NewExpense,
            format_display_date, parse_display_date,
        },
        store::{ExpenseStore, RawRow},
        timezone,
    };

    use super::{AppState, format_amount_cell};

    #[derive(Debug, Default)]
    enum FailureMode {
        #[default]
        None,
        Unauthorized,
        Transport,
    }

    /// An in-memory stand-in for the spreadsheet, indexed the same way: the
    /// row at position N lives at `rows[N - 2]`.
    #[derive(Debug, Default)]
    struct FakeSheetStore {
        rows: Vec<RawRow>,
        failure_mode: FailureMode,
    }

    impl FakeSheetStore {
        fn with_rows(rows: Vec<RawRow>) -> Self {
            Self {
                rows,
                ..Self::default()
            }
        }

        fn check_failure(&self) -> Result<(), Error> {
            match self.failure_mode {
                FailureMode::None => Ok(()),
                FailureMode::Unauthorized => Err(Error::Unauthorized),
                FailureMode::Transport => Err(Error::Store("connection reset".to_owned())),
            }
        }
    }

    impl ExpenseStore for FakeSheetStore {
        async fn fetch_rows(&mut self) -> Result<Vec<RawRow>, Error> {
            self.check_failure()?;
            Ok(self.rows.clone())
        }

        async fn append_row(&mut self, row: RawRow) -> Result<(), Error> {
            self.check_failure()?;
            self.rows.push(row);
            Ok(())
        }

        async fn update_row(&mut self, position: u32, row: RawRow) -> Result<(), Error> {
            self.check_failure()?;
            self.rows[(position - FIRST_DATA_ROW) as usize] = row;
            Ok(())
        }

        async fn clear_row(&mut self, position: u32) -> Result<(), Error> {
            self.check_failure()?;
            self.rows[(position - FIRST_DATA_ROW) as usize] = RawRow::default();
            Ok(())
        }
    }

    fn sheet_row(date: &str, amount: &str, category: &str, description: &str) -> RawRow {
        RawRow::from_cells(
            [date, amount, category, description]
                .iter()
                .map(|cell| cell.to_string())
                .collect(),
        )
    }

    fn current_month_date() -> String {
        format_display_date(timezone::local_now("UTC").unwrap())
    }

    #[tokio::test]
    async fn reload_replaces_the_collection_wholesale() {
        let store = FakeSheetStore::with_rows(vec![
            sheet_row("01/02/2026 10:00", "5000", "Comida", "Almuerzo"),
            sheet_row("02/02/2026 11:00", "abc", "Transporte", ""),
        ]);
        let mut session = AppState::new(store, "UTC").unwrap();

        session.reload().await.unwrap();

        let records = session.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_position, 2);
        assert_eq!(records[1].row_position, 3);
        assert_eq!(records[0].amount, 5000.0);
        assert_eq!(records[1].amount, 0.0, "unparseable amounts map to zero");
    }

    #[tokio::test]
    async fn failed_reload_keeps_the_previous_collection() {
        let store =
            FakeSheetStore::with_rows(vec![sheet_row("01/02/2026 10:00", "5000", "Comida", "")]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        session.store.failure_mode = FailureMode::Transport;
        let got = session.reload().await;

        assert_eq!(got, Err(Error::Store("connection reset".to_owned())));
        assert_eq!(session.records().len(), 1);
    }

    #[tokio::test]
    async fn unauthorized_reload_keeps_the_previous_collection() {
        let store =
            FakeSheetStore::with_rows(vec![sheet_row("01/02/2026 10:00", "5000", "Comida", "")]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        session.store.failure_mode = FailureMode::Unauthorized;
        let got = session.reload().await;

        assert_eq!(got, Err(Error::Unauthorized));
        assert_eq!(session.records().len(), 1);
    }

    #[tokio::test]
    async fn add_stamps_a_parseable_display_date() {
        let store = FakeSheetStore::default();
        let mut session = AppState::new(store, "UTC").unwrap();

        session
            .add(NewExpense {
                amount: 5000.0,
                category: "Comida".to_owned(),
                description: "Almuerzo".to_owned(),
            })
            .await
            .unwrap();

        let records = session.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].occurred_at.is_some());
        assert_eq!(
            parse_display_date(&records[0].display_date),
            records[0].occurred_at
        );
    }

    #[tokio::test]
    async fn delete_clears_the_row_without_renumbering_the_rest() {
        let store = FakeSheetStore::with_rows(vec![
            sheet_row("01/01/2026 10:00", "100", "Comida", "a"),
            sheet_row("02/01/2026 10:00", "200", "Comida", "b"),
            sheet_row("03/01/2026 10:00", "300", "Comida", "c"),
        ]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        session.delete(3).await.unwrap();

        let positions: Vec<u32> = session
            .records()
            .iter()
            .map(|record| record.row_position)
            .collect();
        assert_eq!(positions, vec![2, 4]);
    }

    #[tokio::test]
    async fn update_rewrites_the_target_row() {
        let store =
            FakeSheetStore::with_rows(vec![sheet_row("01/01/2026 10:00", "100", "Comida", "a")]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        session
            .update(
                2,
                EditedExpense {
                    occurred_at: parse_display_date("05/01/2026 12:30").unwrap(),
                    amount: 750.5,
                    category: "Transporte".to_owned(),
                    description: "Taxi".to_owned(),
                },
            )
            .await
            .unwrap();

        let record = &session.records()[0];
        assert_eq!(record.display_date, "05/01/2026 12:30");
        assert_eq!(record.amount, 750.5);
        assert_eq!(record.category, "Transporte");
    }

    #[tokio::test]
    async fn update_and_delete_reject_unknown_rows() {
        let store =
            FakeSheetStore::with_rows(vec![sheet_row("01/01/2026 10:00", "100", "Comida", "a")]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        let update = session
            .update(
                9,
                EditedExpense {
                    occurred_at: parse_display_date("05/01/2026 12:30").unwrap(),
                    amount: 1.0,
                    category: "Comida".to_owned(),
                    description: String::new(),
                },
            )
            .await;
        let delete = session.delete(9).await;

        assert_eq!(update, Err(Error::UpdateMissingExpense(9)));
        assert_eq!(delete, Err(Error::DeleteMissingExpense(9)));
    }

    #[tokio::test]
    async fn current_view_is_scoped_to_the_current_month() {
        let store = FakeSheetStore::with_rows(vec![
            sheet_row(&current_month_date(), "5000", "Comida", "Almuerzo"),
            sheet_row("15/01/2020 10:00", "100", "Comida", "Viejo"),
        ]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        let view = session.current_view("", CategoryFilter::All).unwrap();

        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].description, "Almuerzo");
        assert_eq!(view.total, 5000.0);
        assert_eq!(view.by_category["Comida"], 5000.0);
    }

    #[tokio::test]
    async fn history_view_excludes_the_current_month() {
        let store = FakeSheetStore::with_rows(vec![
            sheet_row(&current_month_date(), "5000", "Comida", "Almuerzo"),
            sheet_row("15/01/2020 10:00", "100", "Comida", "Viejo"),
            sheet_row("20/01/2020 10:00", "200", "Otros", "Más viejo"),
        ]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        let buckets = session.history_view().unwrap();

        assert_eq!(buckets.len(), 1);
        assert_eq!(
            buckets[0].key,
            MonthKey {
                year: 2020,
                month: 1
            }
        );
        assert_eq!(buckets[0].total, 300.0);
    }

    #[tokio::test]
    async fn export_controls_fall_back_to_the_current_year() {
        let store = FakeSheetStore::default();
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        let years = session.export_years().unwrap();

        assert_eq!(
            years,
            vec![timezone::local_now("UTC").unwrap().year()],
            "an empty sheet still offers the current year"
        );
    }

    #[tokio::test]
    async fn export_view_slices_one_period_oldest_first() {
        let store = FakeSheetStore::with_rows(vec![
            sheet_row("20/01/2026 10:00", "100", "Comida", ""),
            sheet_row("05/01/2026 09:00", "200", "Comida", ""),
            sheet_row("15/02/2026 10:00", "300", "Comida", ""),
        ]);
        let mut session = AppState::new(store, "UTC").unwrap();
        session.reload().await.unwrap();

        let view = session.export_view(MonthKey {
            year: 2026,
            month: 1,
        });

        assert_eq!(view.total, 300.0);
        let positions: Vec<u32> = view
            .records
            .iter()
            .map(|record| record.row_position)
            .collect();
        assert_eq!(positions, vec![3, 2]);
    }

    #[test]
    fn invalid_timezone_is_rejected_at_construction() {
        let store = FakeSheetStore::default();

        let got = AppState::new(store, "America/Springfield");

        assert!(matches!(got, Err(Error::InvalidTimezone(_))));
    }

    #[test]
    fn whole_amounts_are_written_without_a_decimal_point() {
        assert_eq!(format_amount_cell(5000.0), "5000");
        assert_eq!(format_amount_cell(750.5), "750.5");
    }
}
