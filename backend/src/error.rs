//! Error types for the audit log backend.
//!
//! - [`ExtractError`] - Document decoding and line-item extraction errors
//! - [`ExportError`] - Excel and Google Sheets export errors
//! - [`HistoryError`] - Export history registry errors
//! - [`ServerError`] - Top-level HTTP errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Extraction Errors
// =============================================================================

/// Errors while turning an uploaded report into line items.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No file part, or a file part without a name.
    #[error("No selected file")]
    NoFile,

    /// Zero-byte upload.
    #[error("Uploaded file is empty (0 bytes)")]
    EmptyFile,

    /// File extension outside the accepted set.
    #[error("File type not allowed. Please upload a {accepted} file.")]
    UnsupportedType { accepted: String },

    /// PDF could not be parsed.
    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    /// The document was readable but held no item numbers.
    #[error("No item numbers could be extracted from the document")]
    NoItems,

    /// Failed to read file from disk (CLI).
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors from the export targets.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export.
    #[error("No data to export.")]
    NoData,

    /// Unknown `export_type`.
    #[error("Invalid export type")]
    InvalidType(String),

    /// Workbook generation failed.
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// No Google access token configured.
    #[error("Google Sheets credentials not found. Please check your configuration.")]
    MissingCredentials,

    /// Google API call failed.
    #[error("Google Sheets request failed: {0}")]
    Sheets(String),

    /// IO error while preparing the export directory.
    #[error("Export IO error: {0}")]
    Io(#[from] std::io::Error),

    /// History could not be updated.
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

// =============================================================================
// History Errors
// =============================================================================

/// Errors from the export history registry.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Record not found.
    #[error("Export record not found: {0}")]
    NotFound(String),

    /// IO error.
    #[error("History IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Whether the caller, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            ServerError::Extract(ExtractError::Pdf(_)) | ServerError::Extract(ExtractError::Io(_)) => false,
            ServerError::Extract(_) => true,
            ServerError::Export(ExportError::NoData) | ServerError::Export(ExportError::InvalidType(_)) => true,
            ServerError::Export(_) => false,
            ServerError::BadRequest(_) => true,
            ServerError::Internal(_) => false,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
