//! # Auditlog - Refund audit log extraction and export
//!
//! Turns an uploaded refund audit report into an editable list of line
//! items, then exports the list to Excel or Google Sheets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ .txt / .pdf │────▶│  Extractor  │────▶│ Item store  │────▶│  Exporter   │
//! │   report    │     │ (AS400/scan)│     │ (edit/save) │     │ xlsx/Sheets │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    │
//!                                                             ┌─────────────┐
//!                                                             │   History   │
//!                                                             └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use auditlog::{extract_file, Exporter, ExportType};
//!
//! #[tokio::main]
//! async fn main() {
//!     let extraction = extract_file("audit.txt".as_ref()).unwrap();
//!     let exporter = Exporter::new("exports", None);
//!     let record = exporter.export(ExportType::Excel, extraction.items).await.unwrap();
//!     println!("Wrote {}", record.filename);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per concern
//! - [`models`] - LineItem, Period, ExportRecord
//! - [`config`] - Server configuration
//! - [`extract`] - Report decoding and item extraction
//! - [`export`] - Excel and Google Sheets export
//! - [`history`] - Persisted export records
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Extraction
pub mod extract;

// Export
pub mod export;
pub mod history;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigOverrides, ServerConfig};

pub use error::{
    ExportError, ExportResult, ExtractError, ExtractResult, HistoryError, HistoryResult, ServerError,
    ServerResult,
};

pub use models::{derive_date, derive_description, ExportRecord, ExportType, LineItem, Period};

pub use extract::{extract_document, extract_file, extract_text, DocumentKind, Extraction, Strategy};

pub use export::{export_to_excel, ExcelExport, Exporter, SheetLayout, SheetsClient};

pub use history::ExportHistory;

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
