//! Google Sheets storage adapter
//!
//! Wraps the Sheets v4 values endpoints plus a Drive v3 by-name lookup.
//! All row addressing goes through the +2 offset between 0-based record
//! indices and 1-based worksheet rows (row 1 is the header).

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::config::Config;

use super::auth::{AuthManager, ServiceAccountKey};
use super::constants::{DRIVE_FILES_URL, SHEETS_BASE_URL};
use super::models::{ClientRecord, HEADERS, cols};
use super::store::RecordStore;

pub struct SheetsClient {
    http: reqwest::Client,
    auth: Mutex<AuthManager>,
    spreadsheet_id: String,
    sheet_id: i64,
    worksheet: String,
}

impl SheetsClient {
    /// Authorize and resolve the configured spreadsheet and worksheet.
    /// Both ids are cached for the life of the client.
    pub async fn connect(config: &Config) -> Result<Self> {
        let key = ServiceAccountKey::from_file(&config.credentials_path()?)?;
        let http = reqwest::Client::new();

        let mut client = Self {
            auth: Mutex::new(AuthManager::new(key, http.clone())),
            http,
            spreadsheet_id: String::new(),
            sheet_id: 0,
            worksheet: config.worksheet.clone(),
        };

        client.spreadsheet_id = client.resolve_spreadsheet(&config.spreadsheet).await?;
        client.sheet_id = client.resolve_sheet_id(&config.spreadsheet).await?;
        Ok(client)
    }

    async fn bearer(&self) -> Result<String> {
        self.auth.lock().await.token().await
    }

    /// Find the spreadsheet document by name via Drive
    async fn resolve_spreadsheet(&self, name: &str) -> Result<String> {
        let query = format!(
            "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
            name.replace('\'', "\\'")
        );

        let token = self.bearer().await?;
        let request = self
            .http
            .get(DRIVE_FILES_URL)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
            ]);

        let body = send(request, "Drive file lookup").await?;
        let id = body["files"]
            .as_array()
            .and_then(|files| files.first())
            .and_then(|file| file["id"].as_str())
            .with_context(|| format!("Spreadsheet '{}' not found", name))?
            .to_string();

        log::debug!("Resolved spreadsheet '{}' to {}", name, id);
        Ok(id)
    }

    /// Numeric sheet id of the worksheet tab, needed for row deletion
    async fn resolve_sheet_id(&self, spreadsheet_name: &str) -> Result<i64> {
        let token = self.bearer().await?;
        let url = format!("{}/{}", SHEETS_BASE_URL, self.spreadsheet_id);
        let request = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties(sheetId,title)")]);

        let body = send(request, "Spreadsheet metadata fetch").await?;
        let sheets = body["sheets"].as_array().cloned().unwrap_or_default();

        sheets
            .iter()
            .filter_map(|sheet| {
                let props = &sheet["properties"];
                (props["title"].as_str() == Some(self.worksheet.as_str()))
                    .then(|| props["sheetId"].as_i64())
                    .flatten()
            })
            .next()
            .with_context(|| {
                format!(
                    "Worksheet '{}' not found in spreadsheet '{}'",
                    self.worksheet, spreadsheet_name
                )
            })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            SHEETS_BASE_URL,
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    fn warn_on_header_drift(&self, header: &[Value]) {
        for (idx, expected) in HEADERS.iter().enumerate() {
            let actual = header.get(idx).and_then(Value::as_str).unwrap_or("");
            if actual.trim() != *expected {
                log::warn!(
                    "Worksheet '{}' header column {} is '{}', expected '{}'",
                    self.worksheet,
                    idx + 1,
                    actual,
                    expected
                );
            }
        }
    }
}

#[async_trait]
impl RecordStore for SheetsClient {
    async fn append(&self, record: &ClientRecord) -> Result<()> {
        let token = self.bearer().await?;
        let url = format!("{}:append", self.values_url(&quote_title(&self.worksheet)));
        let request = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [record.to_row()] }));

        send(request, "Append row").await?;
        log::debug!("Appended record for '{}'", record.name);
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ClientRecord>> {
        let token = self.bearer().await?;
        let range = full_table_range(&self.worksheet);
        let request = self
            .http
            .get(self.values_url(&range))
            .bearer_auth(token)
            .query(&[("valueRenderOption", "UNFORMATTED_VALUE")]);

        let body = send(request, "Read rows").await?;
        let rows = body["values"].as_array().cloned().unwrap_or_default();

        let mut iter = rows.iter();
        if let Some(header) = iter.next() {
            self.warn_on_header_drift(header.as_array().map_or(&[], Vec::as_slice));
        }

        Ok(iter
            .map(|row| ClientRecord::from_row(row.as_array().map_or(&[], Vec::as_slice)))
            .collect())
    }

    async fn update(&self, index: usize, record: &ClientRecord) -> Result<()> {
        let token = self.bearer().await?;
        let range = row_range(&self.worksheet, index);
        let request = self
            .http
            .put(self.values_url(&range))
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": [record.to_row()] }));

        send(request, "Update row").await?;
        log::debug!("Updated record {} ({})", index, range);
        Ok(())
    }

    async fn delete(&self, index: usize) -> Result<()> {
        let token = self.bearer().await?;
        let url = format!("{}/{}:batchUpdate", SHEETS_BASE_URL, self.spreadsheet_id);
        let (start, end) = delete_row_bounds(index);
        let request = self.http.post(&url).bearer_auth(token).json(&json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.sheet_id,
                        "dimension": "ROWS",
                        "startIndex": start,
                        "endIndex": end,
                    }
                }
            }]
        }));

        send(request, "Delete row").await?;
        log::debug!("Deleted record {} (grid rows {}..{})", index, start, end);
        Ok(())
    }
}

/// Execute a request and parse the JSON body, failing on any non-2xx
/// status. Remote failures carry the status and response body; there is
/// no retry.
async fn send(request: reqwest::RequestBuilder, what: &str) -> Result<Value> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{} request failed to reach the API", what))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("{} failed with {}: {}", what, status, body);
    }

    response
        .json()
        .await
        .with_context(|| format!("{} returned an unparsable body", what))
}

/// Worksheet title quoted for use inside an A1 range
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn last_column() -> char {
    (b'A' + (cols::COUNT - 1) as u8) as char
}

/// A1 range covering the header and every data row, columns A..I
fn full_table_range(worksheet: &str) -> String {
    format!("{}!A1:{}", quote_title(worksheet), last_column())
}

/// A1 range for all columns of the record at `index` (worksheet row index+2)
fn row_range(worksheet: &str, index: usize) -> String {
    let row = index + 2;
    format!(
        "{}!A{}:{}{}",
        quote_title(worksheet),
        row,
        last_column(),
        row
    )
}

/// Grid dimension bounds for deleting the record at `index`: the API is
/// 0-based and end-exclusive, so record N maps to rows [N+1, N+2).
fn delete_row_bounds(index: usize) -> (usize, usize) {
    (index + 1, index + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range_offsets_past_header() {
        assert_eq!(row_range("Klientet", 0), "'Klientet'!A2:I2");
        assert_eq!(row_range("Klientet", 4), "'Klientet'!A6:I6");
    }

    #[test]
    fn test_full_table_range_spans_all_columns() {
        assert_eq!(full_table_range("Klientet"), "'Klientet'!A1:I");
    }

    #[test]
    fn test_quote_title_escapes_quotes() {
        assert_eq!(quote_title("Client's"), "'Client''s'");
    }

    #[test]
    fn test_delete_row_bounds() {
        assert_eq!(delete_row_bounds(0), (1, 2));
        assert_eq!(delete_row_bounds(4), (5, 6));
    }
}
