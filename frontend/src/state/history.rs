//! Rows of the export history table.

use crate::types::{ExportRecord, ExportType};

use super::export::resolve_url;

pub const EMPTY_HISTORY: &str = "No exports yet. Export your data from the results page.";

#[derive(Clone, Debug, PartialEq)]
pub enum RowAction {
    Download(String),
    Open(String),
    Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub id: String,
    pub created: String,
    pub badge: &'static str,
    pub badge_class: &'static str,
    pub filename: String,
    pub item_count: usize,
    pub action: RowAction,
}

impl HistoryRow {
    pub fn from_record(record: &ExportRecord, base: &str) -> Self {
        let (badge, badge_class, action) = match record.export_type {
            ExportType::Excel => (
                "Excel",
                "badge badge-excel",
                match &record.file_path {
                    Some(_) => RowAction::Download(resolve_url(base, &format!("/download/{}", record.filename))),
                    None => RowAction::Unavailable,
                },
            ),
            ExportType::Google => (
                "Google Sheets",
                "badge badge-google",
                match &record.sheet_url {
                    Some(url) => RowAction::Open(url.clone()),
                    None => RowAction::Unavailable,
                },
            ),
        };

        Self {
            id: record.id.clone(),
            created: record.created_display(),
            badge,
            badge_class,
            filename: record.filename.clone(),
            item_count: record.item_count,
            action,
        }
    }
}

/// One row per record, order preserved.
pub fn history_rows(records: &[ExportRecord], base: &str) -> Vec<HistoryRow> {
    records.iter().map(|r| HistoryRow::from_record(r, base)).collect()
}
