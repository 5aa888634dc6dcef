//! Core expense record types shared by the pipeline.

use time::PrimitiveDateTime;

/// Alias for the integer type used for 1-based row addresses in the backing
/// spreadsheet.
pub type RowPosition = u32;

/// The first spreadsheet row that holds record data (row 1 is the header).
pub const FIRST_DATA_ROW: RowPosition = 2;

/// The category assigned to records whose category cell is missing.
pub const DEFAULT_CATEGORY: &str = "Otros";

/// A single expense parsed from one spreadsheet row.
///
/// Records are immutable once mapped; edits and deletes go through the store
/// and produce a fresh collection on the next reload.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Where this record lives in the backing spreadsheet. Stable until the
    /// record is deleted or the sheet is reloaded.
    pub row_position: RowPosition,

    /// When the expense happened, or `None` when the date cell could not be
    /// parsed. Undated records are excluded from every month-based view.
    pub occurred_at: Option<PrimitiveDateTime>,

    /// The date cell exactly as it appears in the spreadsheet, preserved for
    /// display and re-editing.
    pub display_date: String,

    /// How much money was spent. Never negative; unparseable amount cells
    /// map to zero.
    pub amount: f64,

    /// The expense category, e.g. "Comida".
    pub category: String,

    /// A free-text description of what the money was spent on.
    pub description: String,
}

/// The fields of a new expense to append to the spreadsheet.
///
/// The session stamps the current local wall-clock time as the date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// How much money was spent.
    pub amount: f64,

    /// The expense category.
    pub category: String,

    /// A free-text description of what the money was spent on.
    pub description: String,
}

/// Replacement values for an expense that already has a row in the
/// spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct EditedExpense {
    /// When the expense happened.
    pub occurred_at: PrimitiveDateTime,

    /// How much money was spent.
    pub amount: f64,

    /// The expense category.
    pub category: String,

    /// A free-text description of what the money was spent on.
    pub description: String,
}
