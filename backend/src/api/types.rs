//! JSON contracts of the HTTP API.
//!
//! Every mutating endpoint answers with a `success` flag and, on failure,
//! a human-readable `message` the frontend shows verbatim.

use serde::{Deserialize, Serialize};

use crate::models::{ExportRecord, ExportType};

/// Response of `/upload` and `/update-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of items now stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, item_count: usize) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            item_count: Some(item_count),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            item_count: None,
        }
    }
}

/// Response of `/export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExportResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            download_url: None,
            spreadsheet_url: None,
            message: Some(message.into()),
        }
    }
}

impl From<&ExportRecord> for ExportResponse {
    fn from(record: &ExportRecord) -> Self {
        let (download_url, spreadsheet_url, message) = match record.export_type {
            ExportType::Excel => (
                Some(download_url(&record.filename)),
                None,
                "Data exported to Excel successfully.",
            ),
            ExportType::Google => (
                None,
                record.sheet_url.clone(),
                "Data exported to Google Sheets successfully.",
            ),
        };
        Self {
            success: true,
            download_url,
            spreadsheet_url,
            message: Some(message.to_string()),
        }
    }
}

/// Form body of `/export`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportForm {
    #[serde(default = "default_export_type")]
    pub export_type: String,
}

fn default_export_type() -> String {
    ExportType::Excel.as_str().to_string()
}

/// Download route of an exported file.
pub fn download_url(filename: &str) -> String {
    format!("/download/{}", filename)
}

/// A name that stays inside the export directory.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains(['/', '\\'])
        && !filename.contains("..")
        && !filename.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_excel_record_response() {
        let record = ExportRecord::excel("x.xlsx", "/data/exports/x.xlsx", 4);
        let response = ExportResponse::from(&record);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["download_url"], "/download/x.xlsx");
        assert!(json.get("spreadsheet_url").is_none());
    }

    #[test]
    fn test_google_record_response() {
        let record = ExportRecord::google("REFUND AUDIT LOG", "https://docs.google.com/spreadsheets/d/1", 1);
        let response = ExportResponse::from(&record);
        assert_eq!(response.spreadsheet_url.as_deref(), Some("https://docs.google.com/spreadsheets/d/1"));
        assert!(response.download_url.is_none());
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(ApiResponse::failure("No selected file")).unwrap();
        assert_eq!(json, json!({ "success": false, "message": "No selected file" }));
    }

    #[test]
    fn test_export_form_default() {
        let form: ExportForm = serde_json::from_value(json!({})).unwrap();
        assert_eq!(form.export_type, "excel");
    }

    #[test]
    fn test_safe_filenames() {
        assert!(is_safe_filename("refund_audit_log_20250101_120000.xlsx"));
        assert!(!is_safe_filename("../secrets.txt"));
        assert!(!is_safe_filename("a/b.xlsx"));
        assert!(!is_safe_filename(".env"));
        assert!(!is_safe_filename(""));
    }
}
