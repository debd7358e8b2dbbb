//! Google Sheets export over the Sheets v4 and Drive v3 REST APIs.
//!
//! Authenticates with a pre-issued OAuth bearer token (`GOOGLE_ACCESS_TOKEN`).

use chrono::Local;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;

use super::layout::{SheetLayout, FIRST_DATA_ROW, HEADERS, SHEET_NAME, TITLE};
use crate::error::{ExportError, ExportResult};
use crate::models::LineItem;

const SHEETS_API: &str = "https://sheets.googleapis.com";
const DRIVE_API: &str = "https://www.googleapis.com";

/// 0-based index of the Total Sell column.
const SELL_COLUMN: usize = 3;

/// A spreadsheet created by [`SheetsClient::export`].
#[derive(Debug, Clone)]
pub struct SheetsExport {
    pub title: String,
    pub spreadsheet_id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
    spreadsheet_url: String,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// Google Sheets API client
#[derive(Clone)]
pub struct SheetsClient {
    token: String,
    http: reqwest::Client,
    sheets_api: String,
    drive_api: String,
}

impl SheetsClient {
    pub fn new(token: String) -> Self {
        Self {
            token,
            http: reqwest::Client::new(),
            sheets_api: SHEETS_API.to_string(),
            drive_api: DRIVE_API.to_string(),
        }
    }

    /// Create a client from environment variable GOOGLE_ACCESS_TOKEN
    pub fn from_env() -> ExportResult<Self> {
        let token = env::var("GOOGLE_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ExportError::MissingCredentials)?;
        Ok(Self::new(token))
    }

    /// Create a spreadsheet holding the items and share it read-only.
    pub async fn export(&self, items: &[LineItem]) -> ExportResult<SheetsExport> {
        let title = format!("{} - {}", SHEET_NAME, Local::now().format("%Y-%m-%d %H:%M:%S"));
        let layout = SheetLayout::build(items);

        let created = self.create_spreadsheet(&title).await?;
        self.write_values(&created.spreadsheet_id, sheet_values(&layout)).await?;
        if let Some(sheet) = created.sheets.first() {
            self.format_header(&created.spreadsheet_id, sheet.properties.sheet_id, &layout).await?;
        }
        self.share_public(&created.spreadsheet_id).await?;

        Ok(SheetsExport {
            title,
            spreadsheet_id: created.spreadsheet_id,
            url: created.spreadsheet_url,
        })
    }

    async fn create_spreadsheet(&self, title: &str) -> ExportResult<CreatedSpreadsheet> {
        let body = json!({
            "properties": { "title": title },
            "sheets": [{ "properties": { "title": SHEET_NAME } }]
        });
        let url = format!("{}/v4/spreadsheets", self.sheets_api);
        let response = self.send(self.http.post(&url).json(&body)).await?;
        serde_json::from_str(&response).map_err(|e| ExportError::Sheets(format!("invalid create response: {}", e)))
    }

    async fn write_values(&self, spreadsheet_id: &str, values: Vec<Vec<Value>>) -> ExportResult<()> {
        let range = format!("'{}'!A1", SHEET_NAME);
        let mut url = Url::parse(&format!("{}/v4/spreadsheets/{}/values", self.sheets_api, spreadsheet_id))
            .map_err(|e| ExportError::Sheets(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ExportError::Sheets("invalid Sheets API base URL".to_string()))?
            .push(&range);

        let body = json!({ "range": range, "majorDimension": "ROWS", "values": values });
        let request = self
            .http
            .put(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body);
        self.send(request).await.map(|_| ())
    }

    async fn format_header(&self, spreadsheet_id: &str, sheet_id: i64, layout: &SheetLayout) -> ExportResult<()> {
        let body = format_requests(sheet_id, layout);
        let url = format!("{}/v4/spreadsheets/{}:batchUpdate", self.sheets_api, spreadsheet_id);
        self.send(self.http.post(&url).json(&body)).await.map(|_| ())
    }

    async fn share_public(&self, spreadsheet_id: &str) -> ExportResult<()> {
        let url = format!("{}/drive/v3/files/{}/permissions", self.drive_api, spreadsheet_id);
        let body = json!({ "type": "anyone", "role": "reader" });
        self.send(self.http.post(&url).json(&body)).await.map(|_| ())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ExportResult<String> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ExportError::Sheets(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExportError::Sheets(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<GoogleError>(&body) {
                return Err(ExportError::Sheets(error.error.message));
            }
            return Err(ExportError::Sheets(format!("HTTP {}: {}", status, body)));
        }
        Ok(body)
    }
}

/// `batchUpdate` body: merged bold title, grey header row, and currency
/// formatting on Total Sell for the data and grand total rows.
pub fn format_requests(sheet_id: i64, layout: &SheetLayout) -> Value {
    let columns = HEADERS.len();
    let mut requests = vec![
        json!({
            "mergeCells": {
                "range": { "sheetId": sheet_id, "startRowIndex": 0, "endRowIndex": 1,
                           "startColumnIndex": 0, "endColumnIndex": columns },
                "mergeType": "MERGE_ALL"
            }
        }),
        json!({
            "repeatCell": {
                "range": { "sheetId": sheet_id, "startRowIndex": 0, "endRowIndex": 1 },
                "cell": { "userEnteredFormat": {
                    "textFormat": { "bold": true, "fontSize": 14 },
                    "horizontalAlignment": "CENTER"
                } },
                "fields": "userEnteredFormat(textFormat,horizontalAlignment)"
            }
        }),
        json!({
            "repeatCell": {
                "range": { "sheetId": sheet_id, "startRowIndex": 1, "endRowIndex": 2,
                           "startColumnIndex": 0, "endColumnIndex": columns },
                "cell": { "userEnteredFormat": {
                    "backgroundColor": { "red": 0.83, "green": 0.83, "blue": 0.83 },
                    "textFormat": { "bold": true },
                    "horizontalAlignment": "CENTER"
                } },
                "fields": "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment)"
            }
        }),
    ];

    if let Some(total) = &layout.total {
        requests.push(json!({
            "repeatCell": {
                "range": { "sheetId": sheet_id,
                           "startRowIndex": FIRST_DATA_ROW - 1, "endRowIndex": total.row,
                           "startColumnIndex": SELL_COLUMN, "endColumnIndex": SELL_COLUMN + 1 },
                "cell": { "userEnteredFormat": {
                    "numberFormat": { "type": "CURRENCY", "pattern": "$#,##0.00" }
                } },
                "fields": "userEnteredFormat.numberFormat"
            }
        }));
    }

    json!({ "requests": requests })
}

/// Cell values for the whole sheet, formulas entered as text.
pub fn sheet_values(layout: &SheetLayout) -> Vec<Vec<Value>> {
    let mut values = vec![
        vec![json!(TITLE)],
        HEADERS.iter().map(|h| json!(h)).collect(),
    ];

    values.extend(layout.rows.iter().map(|row| {
        vec![
            json!(row.item_number),
            json!(row.department),
            json!(row.quantity),
            json!(row.total_sell),
            json!(row.period),
        ]
    }));

    if let Some(total) = &layout.total {
        values.push(vec![
            json!(""),
            json!("Grand Total"),
            json!(total.quantity_formula),
            json!(total.sell_formula),
            json!(""),
        ]);
    }

    values
}
