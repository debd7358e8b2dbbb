//! Page state, free of DOM and reactive types.
//!
//! Components hold these in signals and render from them.

pub mod alerts;
pub mod derive;
pub mod editor;
pub mod export;
pub mod history;
pub mod upload;

pub use alerts::{Alert, AlertQueue, Severity};
pub use derive::{current_year, derive_date, derive_description};
pub use editor::{EditorRow, RowEdit, RowEditor};
pub use export::{interpret, progress_message, resolve_url, ExportOutcome};
pub use history::{history_rows, HistoryRow, RowAction, EMPTY_HISTORY};
pub use upload::{UploadConfig, UploadEffect, UploadMachine, UploadOutcome, UploadPhase};
