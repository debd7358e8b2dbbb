//! Application configuration.
//!
//! Compile-time settings for the refund audit log frontend.

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://localhost:5000";

/// Alerts dismiss themselves after this many milliseconds.
pub const ALERT_DISMISS_MS: u32 = 5000;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Exports listed on the results page.
pub const RECENT_EXPORTS: usize = 5;

/// Shown when a failed upload carries no message.
pub const UPLOAD_ERROR_FALLBACK: &str = "Error processing file";

/// Shown when a failed save carries no message.
pub const SAVE_ERROR_FALLBACK: &str = "Error saving changes";

/// Shown when a failed export carries no message.
pub const EXPORT_ERROR_FALLBACK: &str = "Error exporting data";
