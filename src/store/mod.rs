//! The spreadsheet store: the raw row shape and the reader/writer contract.

mod sheets;

pub use sheets::GoogleSheetsStore;

use crate::{Error, record::RowPosition};

/// One data row of the backing sheet: up to four text cells in
/// `[date, amount, category, description]` order.
///
/// The sheet returns variable-length cell arrays (trailing empty cells are
/// omitted) and this type absorbs that looseness at the store boundary. Only
/// [map_row](crate::record::map_row) should consume it; the rest of the
/// crate works with [ExpenseRecord](crate::record::ExpenseRecord).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// The date cell, e.g. "31/01/2026 09:30".
    pub date: Option<String>,

    /// The amount cell as entered, e.g. "5000".
    pub amount: Option<String>,

    /// The category cell.
    pub category: Option<String>,

    /// The description cell.
    pub description: Option<String>,
}

impl RawRow {
    /// Build a row from the cell array the sheet returns.
    ///
    /// Cells beyond the fourth are ignored; cells the sheet omitted become
    /// `None`.
    pub fn from_cells(cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();

        Self {
            date: cells.next(),
            amount: cells.next(),
            category: cells.next(),
            description: cells.next(),
        }
    }

    /// Flatten the row to exactly four cells for a write, filling gaps with
    /// empty strings.
    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.date.unwrap_or_default(),
            self.amount.unwrap_or_default(),
            self.category.unwrap_or_default(),
            self.description.unwrap_or_default(),
        ]
    }

    /// Whether every cell is missing or empty.
    ///
    /// A blank row is what a logically deleted (cleared) row looks like on
    /// the next fetch.
    pub fn is_blank(&self) -> bool {
        [&self.date, &self.amount, &self.category, &self.description]
            .into_iter()
            .all(|cell| cell.as_deref().unwrap_or_default().is_empty())
    }
}

/// Handles reading and writing expense rows in the backing spreadsheet.
///
/// There is exactly one writer per session; presentation code only ever sees
/// the record collection the session rebuilds from [fetch_rows](ExpenseStore::fetch_rows).
#[allow(async_fn_in_trait)]
pub trait ExpenseStore {
    /// Fetch every data row of the sheet, in sheet order.
    ///
    /// An empty sheet is not an error and yields an empty vector.
    ///
    /// # Errors
    /// Returns [Error::Unauthorized] if the store rejected the caller's
    /// credentials, or [Error::Store] for any other failure.
    async fn fetch_rows(&mut self) -> Result<Vec<RawRow>, Error>;

    /// Append one row after the last data row.
    ///
    /// # Errors
    /// Returns [Error::Unauthorized] or [Error::Store] as for
    /// [fetch_rows](ExpenseStore::fetch_rows).
    async fn append_row(&mut self, row: RawRow) -> Result<(), Error>;

    /// Overwrite the four cells at `position`.
    ///
    /// # Errors
    /// Returns [Error::Unauthorized] or [Error::Store] as for
    /// [fetch_rows](ExpenseStore::fetch_rows).
    async fn update_row(&mut self, position: RowPosition, row: RawRow) -> Result<(), Error>;

    /// Clear the four cells at `position`.
    ///
    /// The physical row is kept, so the positions of the remaining records
    /// never shift on a delete.
    ///
    /// # Errors
    /// Returns [Error::Unauthorized] or [Error::Store] as for
    /// [fetch_rows](ExpenseStore::fetch_rows).
    async fn clear_row(&mut self, position: RowPosition) -> Result<(), Error>;
}
