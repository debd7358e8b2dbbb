//! UI Components for the refund audit log.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar
//! - [`Hero`] - Home page title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadWidget`] - Single-file upload with drag & drop
//! - [`RowEditorTable`] - Editable results table with bulk add and save
//! - [`ExportPanel`] / [`QuickExport`] - Excel and Google Sheets export
//! - [`HistoryTable`] - Past exports
//! - [`AlertStack`] - Auto-dismissing banners
//! - [`LogsPanel`] - Real-time processing logs (SSE)
//! - [`ProgressOverlay`] - Blocking progress modal

mod alert;
mod editor;
mod export;
mod footer;
mod header;
mod hero;
mod history;
mod logs;
mod progress;
mod upload;

pub use alert::*;
pub use editor::*;
pub use export::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use history::*;
pub use logs::*;
pub use progress::*;
pub use upload::*;
