//! Shared server state.
//!
//! One item set per server process. Upload and `/update-data` both replace it
//! wholesale; export reads a snapshot.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::error::HistoryResult;
use crate::export::{Exporter, SheetsClient};
use crate::history::ExportHistory;
use crate::models::{ExportRecord, LineItem};

#[derive(Clone)]
pub struct AppState {
    items: Arc<RwLock<Vec<LineItem>>>,
    history: Arc<RwLock<ExportHistory>>,
    pub exporter: Exporter,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let sheets = config.google_token.clone().map(SheetsClient::new);
        let exporter = Exporter::new(config.export_dir.clone(), sheets);
        let history = ExportHistory::with_dir(config.history_dir());

        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            history: Arc::new(RwLock::new(history)),
            exporter,
            config: Arc::new(config),
        }
    }

    /// Snapshot of the current items, in order.
    pub async fn items(&self) -> Vec<LineItem> {
        self.items.read().await.clone()
    }

    /// Replace the whole item set, returning the new count.
    pub async fn replace_items(&self, items: Vec<LineItem>) -> usize {
        let mut guard = self.items.write().await;
        *guard = items;
        guard.len()
    }

    pub async fn record_export(&self, record: ExportRecord) -> HistoryResult<()> {
        self.history.write().await.record(record)
    }

    /// Export history, newest first.
    pub async fn history(&self) -> Vec<ExportRecord> {
        self.history.read().await.list().into_iter().cloned().collect()
    }
}
