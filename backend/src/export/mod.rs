//! Export of the current item set to Excel or Google Sheets.
//!
//! Both targets share [`layout::SheetLayout`]; every successful export
//! yields an [`ExportRecord`] for the history registry.

pub mod excel;
pub mod layout;
pub mod sheets;

use std::path::PathBuf;

use crate::api::logs::{log_info, log_success};
use crate::error::{ExportError, ExportResult};
use crate::models::{ExportRecord, ExportType, LineItem};

pub use excel::{export_to_excel, ExcelExport};
pub use layout::SheetLayout;
pub use sheets::{SheetsClient, SheetsExport};

/// Runs exports against the configured targets.
#[derive(Clone)]
pub struct Exporter {
    export_dir: PathBuf,
    sheets: Option<SheetsClient>,
}

impl Exporter {
    pub fn new(export_dir: impl Into<PathBuf>, sheets: Option<SheetsClient>) -> Self {
        Self { export_dir: export_dir.into(), sheets }
    }

    pub fn export_dir(&self) -> &PathBuf {
        &self.export_dir
    }

    /// Export the items and describe the result.
    ///
    /// An empty item set is refused before any target is touched.
    pub async fn export(&self, export_type: ExportType, items: Vec<LineItem>) -> ExportResult<ExportRecord> {
        if items.is_empty() {
            return Err(ExportError::NoData);
        }
        let count = items.len();

        match export_type {
            ExportType::Excel => {
                log_info(format!("Writing {} items to Excel...", count));
                let dir = self.export_dir.clone();
                let export = tokio::task::spawn_blocking(move || export_to_excel(&items, &dir))
                    .await
                    .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))??;
                log_success(format!("Excel file ready: {}", export.filename));
                Ok(ExportRecord::excel(
                    export.filename,
                    export.path.to_string_lossy().to_string(),
                    count,
                ))
            }
            ExportType::Google => {
                let client = self.sheets.as_ref().ok_or(ExportError::MissingCredentials)?;
                log_info(format!("Creating Google spreadsheet with {} items...", count));
                let export = client.export(&items).await?;
                log_success(format!("Spreadsheet shared: {}", export.url));
                Ok(ExportRecord::google(export.title, export.url, count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_empty_export_refused() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), None);
        let result = exporter.export(ExportType::Excel, vec![]).await;
        assert!(matches!(result, Err(ExportError::NoData)));
    }

    #[tokio::test]
    async fn test_excel_export_record() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), None);
        let record = exporter
            .export(ExportType::Excel, vec![LineItem::new("1"), LineItem::new("2")])
            .await
            .unwrap();

        assert_eq!(record.export_type, ExportType::Excel);
        assert_eq!(record.item_count, 2);
        assert!(record.sheet_url.is_none());
        assert!(std::path::Path::new(record.file_path.as_deref().unwrap()).exists());
    }

    #[tokio::test]
    async fn test_google_without_credentials() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), None);
        let result = exporter.export(ExportType::Google, vec![LineItem::new("1")]).await;
        assert!(matches!(result, Err(ExportError::MissingCredentials)));
    }
}
