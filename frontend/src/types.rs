//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Domain Types** - Period, LineItem, ExportRecord (backend wire format)
//! - **Log Types** - Real-time log streaming
//! - **API Types** - Backend response structures
//! - **Error Types** - Frontend error handling

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Domain Types
// =============================================================================

/// Fiscal period `P01`..`P12`, one per calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period(u8);

impl Period {
    /// The dropdown options, in order.
    pub fn all() -> impl Iterator<Item = Period> {
        (1..=12).map(Period)
    }

    pub fn from_month(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Period(month as u8))
    }

    /// Parse `P04` (case-insensitive, one or two digits).
    pub fn parse(code: &str) -> Option<Self> {
        let digits = code.trim().strip_prefix(['P', 'p'])?;
        Self::from_month(digits.parse().ok()?)
    }

    /// Editor resolution: unknown codes select the first option.
    pub fn from_code_or_first(code: &str) -> Self {
        Self::parse(code).unwrap_or(Period(1))
    }

    /// Period of the current local month.
    pub fn current() -> Self {
        Period(chrono::Local::now().month() as u8)
    }

    pub fn month(&self) -> u32 {
        self.0 as u32
    }

    pub fn code(&self) -> String {
        format!("P{:02}", self.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:02}", self.0)
    }
}

/// One audit entry as exchanged with `/items` and `/update-data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_price")]
    pub price: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub exception: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub department: String,
}

fn default_price() -> String {
    "0.00".to_string()
}

fn default_quantity() -> i64 {
    1
}

/// Export target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Excel,
    Google,
}

impl ExportType {
    /// Form value of `export_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportType::Excel => "excel",
            ExportType::Google => "google",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportType::Excel => "Excel",
            ExportType::Google => "Google Sheets",
        }
    }
}

/// A completed export, as listed by `/export-history`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(default)]
    pub id: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub export_type: ExportType,
    pub filename: String,
    pub item_count: usize,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub sheet_url: Option<String>,
}

impl ExportRecord {
    /// `created_at` in local time, or the raw value if it does not parse.
    pub fn created_display(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single log entry from the backend.
///
/// Received via SSE from `/api/logs` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    #[serde(default)]
    pub timestamp: String,
    /// Client-side arrival order, assigned by `push_capped`
    #[serde(skip)]
    pub seq: u64,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response of `/upload` and `/update-data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub item_count: Option<usize>,
}

/// Response of `/export`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub spreadsheet_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// File upload failed.
    Upload(String),
    /// Network/HTTP error.
    Network(String),
    /// The server answered `success: false`.
    Server(String),
    /// Export failed.
    Export(String),
}

impl AppError {
    /// The bare message, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::Upload(msg) | AppError::Network(msg) | AppError::Server(msg) | AppError::Export(msg) => msg,
        }
    }

    /// Text for an alert: transport failures get the generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Network(_) => fallback.to_string(),
            other => other.message().to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upload(msg) => write!(f, "Upload error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server(msg) => write!(f, "Server error: {}", msg),
            AppError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_codes() {
        assert_eq!(Period::parse("P04").map(|p| p.month()), Some(4));
        assert_eq!(Period::parse("p4").map(|p| p.code()), Some("P04".to_string()));
        assert_eq!(Period::parse("P13"), None);
        assert_eq!(Period::from_code_or_first("bogus").code(), "P01");
        assert_eq!(Period::all().count(), 12);
    }

    #[test]
    fn test_line_item_from_backend() {
        let json = r#"{"item_number":"1234567","price":"12.99-","quantity":-1,"period":"P05","department":"12"}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, -1);
        assert_eq!(item.period.as_deref(), Some("P05"));
        assert_eq!(item.exception, "");
    }

    #[test]
    fn test_export_record_wire_format() {
        let json = r#"{
            "id": "a1",
            "created_at": "2025-05-14T10:30:00Z",
            "export_type": "google",
            "filename": "REFUND AUDIT LOG - 2025-05-14",
            "item_count": 3,
            "file_path": null,
            "sheet_url": "https://docs.google.com/spreadsheets/d/x"
        }"#;
        let record: ExportRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.export_type, ExportType::Google);
        assert!(record.file_path.is_none());
        assert!(record.created_display().starts_with("2025-05-14"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.user_message("Error saving changes"), "Error saving changes");
        assert_eq!(AppError::Server("Invalid export type".into()).user_message("x"), "Invalid export type");
    }
}
