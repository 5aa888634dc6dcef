//! Defines the app level error type.

use crate::record::RowPosition;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backing spreadsheet rejected the access token.
    ///
    /// Callers should hand control back to the sign-in flow. The in-memory
    /// record collection must be left as-is so the last good view survives
    /// the re-authentication round trip.
    #[error("the spreadsheet rejected the access token, sign in again")]
    Unauthorized,

    /// The backing spreadsheet could not be reached or returned an
    /// unexpected response.
    ///
    /// This is a transient, user-visible condition, not a fatal one. The
    /// in-memory record collection is left unchanged.
    #[error("could not reach the spreadsheet: {0}")]
    Store(String),

    /// Tried to update a row that is not in the loaded record collection.
    #[error("tried to update row {0}, which holds no expense")]
    UpdateMissingExpense(RowPosition),

    /// Tried to delete a row that is not in the loaded record collection.
    #[error("tried to delete row {0}, which holds no expense")]
    DeleteMissingExpense(RowPosition),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("an unhandled HTTP error occurred: {}", value);
        Error::Store(value.without_url().to_string())
    }
}
