//! Interpreting `/export` responses.

use crate::config::EXPORT_ERROR_FALLBACK;
use crate::types::{AppResult, ExportResponse, ExportType};

/// What the page does with an export result.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportOutcome {
    /// Navigate the current page (Excel download).
    Navigate(String),
    /// Open a new browsing context (Google Sheets).
    OpenTab(String),
    Failed(String),
}

impl ExportOutcome {
    /// Target for the inline link, if any.
    pub fn link(&self) -> Option<&str> {
        match self {
            ExportOutcome::Navigate(url) | ExportOutcome::OpenTab(url) => Some(url),
            ExportOutcome::Failed(_) => None,
        }
    }

    /// Whether the export produced a new history record.
    pub fn recorded(&self) -> bool {
        !matches!(self, ExportOutcome::Failed(_))
    }
}

/// Progress modal text per target.
pub fn progress_message(export_type: ExportType) -> &'static str {
    match export_type {
        ExportType::Excel => "Generating Excel file...",
        ExportType::Google => "Exporting to Google Sheets...",
    }
}

/// Absolute URL for a backend path; absolute URLs pass through.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), url)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), url)
    }
}

/// Decide navigation from the response and the requested target.
pub fn interpret(export_type: ExportType, result: AppResult<ExportResponse>, base: &str) -> ExportOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => return ExportOutcome::Failed(err.user_message(EXPORT_ERROR_FALLBACK)),
    };

    if !response.success {
        return ExportOutcome::Failed(response.message.unwrap_or_else(|| EXPORT_ERROR_FALLBACK.to_string()));
    }

    let url = match export_type {
        ExportType::Excel => response.download_url.map(|u| ExportOutcome::Navigate(resolve_url(base, &u))),
        ExportType::Google => response.spreadsheet_url.map(ExportOutcome::OpenTab),
    };
    url.unwrap_or_else(|| ExportOutcome::Failed(EXPORT_ERROR_FALLBACK.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;

    const BASE: &str = "http://localhost:5000";

    fn ok(download: Option<&str>, sheet: Option<&str>) -> AppResult<ExportResponse> {
        Ok(ExportResponse {
            success: true,
            download_url: download.map(str::to_string),
            spreadsheet_url: sheet.map(str::to_string),
            message: None,
        })
    }

    #[test]
    fn test_excel_navigates() {
        let outcome = interpret(ExportType::Excel, ok(Some("/files/x.xlsx"), None), BASE);
        assert_eq!(outcome, ExportOutcome::Navigate("http://localhost:5000/files/x.xlsx".into()));
        assert_eq!(outcome.link(), Some("http://localhost:5000/files/x.xlsx"));
    }

    #[test]
    fn test_google_opens_tab() {
        let outcome = interpret(ExportType::Google, ok(None, Some("https://docs.google.com/sheet")), BASE);
        assert_eq!(outcome, ExportOutcome::OpenTab("https://docs.google.com/sheet".into()));
    }

    #[test]
    fn test_failure_messages() {
        let response = ExportResponse {
            success: false,
            download_url: None,
            spreadsheet_url: None,
            message: Some("No data to export.".into()),
        };
        assert_eq!(
            interpret(ExportType::Excel, Ok(response), BASE),
            ExportOutcome::Failed("No data to export.".into())
        );

        let mut silent = ok(None, None).unwrap();
        silent.success = false;
        assert_eq!(
            interpret(ExportType::Google, Ok(silent), BASE),
            ExportOutcome::Failed("Error exporting data".into())
        );

        let err = Err(AppError::Network("Failed to fetch".into()));
        assert_eq!(
            interpret(ExportType::Excel, err, BASE),
            ExportOutcome::Failed("Error exporting data".into())
        );
    }

    #[test]
    fn test_success_without_url_is_failure() {
        let outcome = interpret(ExportType::Excel, ok(None, Some("https://x")), BASE);
        assert_eq!(outcome, ExportOutcome::Failed("Error exporting data".into()));
        assert!(!outcome.recorded());
    }

    #[test]
    fn test_successful_exports_refresh_history() {
        assert!(interpret(ExportType::Excel, ok(Some("/download/a.xlsx"), None), BASE).recorded());
        assert!(interpret(ExportType::Google, ok(None, Some("https://docs.google.com/s")), BASE).recorded());
        let err = Err(AppError::Server("Invalid export type".into()));
        assert!(!interpret(ExportType::Excel, err, BASE).recorded());
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(resolve_url("http://h:5000/", "/download/a.xlsx"), "http://h:5000/download/a.xlsx");
        assert_eq!(resolve_url("http://h:5000", "download/a.xlsx"), "http://h:5000/download/a.xlsx");
        assert_eq!(resolve_url("http://h:5000", "https://cdn/a.xlsx"), "https://cdn/a.xlsx");
    }
}
