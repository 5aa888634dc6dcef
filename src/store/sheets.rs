//! Implements an expense store backed by the Google Sheets values API.

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    record::RowPosition,
    store::{ExpenseStore, RawRow},
};

const API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// The range of one sheet holding the data rows (row 1 is the header).
const DATA_RANGE: &str = "A2:D";

/// The columns written on append, update, and clear.
const WRITE_COLUMNS: &str = "A:D";

/// Stores expense rows in one tab of a Google Sheets spreadsheet.
///
/// All calls go through the v4 values API using a bearer access token that
/// the (out of scope) sign-in flow has already acquired. A 401 or 403 from
/// the API surfaces as [Error::Unauthorized] so the caller can hand control
/// back to that flow; every other failure is a transient [Error::Store].
#[derive(Debug, Clone)]
pub struct GoogleSheetsStore {
    client: Client,
    spreadsheet_id: String,
    sheet_name: String,
    access_token: String,
}

/// The request and response body of the values API.
#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Vec<String>>>,
}

impl GoogleSheetsStore {
    /// Create a store for the tab `sheet_name` of the spreadsheet
    /// `spreadsheet_id`, authenticating with `access_token`.
    pub fn new(spreadsheet_id: &str, sheet_name: &str, access_token: &str) -> Self {
        Self {
            client: Client::new(),
            spreadsheet_id: spreadsheet_id.to_owned(),
            sheet_name: sheet_name.to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{API_BASE_URL}/{}/values/{}!{range}",
            self.spreadsheet_id, self.sheet_name
        )
    }

    fn row_range(position: RowPosition) -> String {
        format!("A{position}:D{position}")
    }

    fn check_status(response: Response) -> Result<Response, Error> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthorized),
            status => Err(Error::Store(format!(
                "the Sheets API returned HTTP {status}"
            ))),
        }
    }
}

impl ExpenseStore for GoogleSheetsStore {
    async fn fetch_rows(&mut self) -> Result<Vec<RawRow>, Error> {
        let response = self
            .client
            .get(self.values_url(DATA_RANGE))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = Self::check_status(response)?;

        let value_range: ValueRange = response.json().await?;
        let rows = value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(RawRow::from_cells)
            .collect();

        Ok(rows)
    }

    async fn append_row(&mut self, row: RawRow) -> Result<(), Error> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED",
            self.values_url(WRITE_COLUMNS)
        );
        let body = ValueRange {
            values: Some(vec![row.into_cells()]),
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response)?;

        Ok(())
    }

    async fn update_row(&mut self, position: RowPosition, row: RawRow) -> Result<(), Error> {
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(&Self::row_range(position))
        );
        let body = ValueRange {
            values: Some(vec![row.into_cells()]),
        };

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response)?;

        Ok(())
    }

    async fn clear_row(&mut self, position: RowPosition) -> Result<(), Error> {
        let url = format!("{}:clear", self.values_url(&Self::row_range(position)));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::check_status(response)?;

        Ok(())
    }
}
