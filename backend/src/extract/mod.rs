//! Line-item extraction from uploaded audit reports.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ .txt / .pdf │────▶│   Decode    │────▶│  AS400 pass │────▶│  LineItem[] │
//! │   (bytes)   │     │ (auto-enc)  │     │ / line scan │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The AS400 fixed-width pass runs first; the generic line scan only runs
//! when it finds nothing. Item numbers are kept once, first occurrence wins.

pub mod as400;
pub mod decode;
pub mod lines;
pub mod pdf;

use std::collections::HashSet;
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};
use crate::models::{derive_description, parse_quantity, LineItem, Period};

pub use decode::{decode_auto, decode_content, detect_encoding, ReportEncoding};

/// Extensions accepted by [`extract_document`].
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

/// Kind of uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    /// Resolve the kind from a file name's extension.
    pub fn from_filename(filename: &str) -> ExtractResult<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("txt") => Ok(Self::Text),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(ExtractError::UnsupportedType { accepted: accepted_description() }),
        }
    }
}

fn accepted_description() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Which pass produced the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    As400,
    LineScan,
}

/// Result of extracting a document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub items: Vec<LineItem>,
    pub kind: DocumentKind,
    /// Detected text encoding (text documents only).
    pub encoding: Option<String>,
    pub strategy: Strategy,
}

/// Extract line items from an uploaded document.
pub fn extract_document(filename: &str, bytes: &[u8]) -> ExtractResult<Extraction> {
    if filename.trim().is_empty() {
        return Err(ExtractError::NoFile);
    }
    let kind = DocumentKind::from_filename(filename)?;
    if bytes.is_empty() {
        return Err(ExtractError::EmptyFile);
    }

    let (text, encoding) = match kind {
        DocumentKind::Text => {
            let (text, encoding) = decode_auto(bytes);
            (text, Some(encoding))
        }
        DocumentKind::Pdf => (pdf::pdf_text(bytes)?, None),
    };

    let (items, strategy) = extract_text(&text)?;
    Ok(Extraction { items, kind, encoding, strategy })
}

/// Read a document from disk and extract it.
pub fn extract_file(path: &Path) -> ExtractResult<Extraction> {
    let bytes = std::fs::read(path)?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    extract_document(filename, &bytes)
}

/// Extract line items from decoded report text.
pub fn extract_text(text: &str) -> ExtractResult<(Vec<LineItem>, Strategy)> {
    let report_date = lines::find_date(text);
    let mut seen = HashSet::new();

    let as400: Vec<LineItem> = as400::parse_report(text)
        .into_iter()
        .filter(|entry| seen.insert(entry.item_number.clone()))
        .map(|entry| {
            let date = if entry.date.is_empty() { report_date.clone() } else { Some(entry.date) };
            let mut item = build_item(entry.item_number, entry.tender, date);
            item.department = entry.department;
            item.quantity = parse_quantity(&entry.quantity);
            item
        })
        .collect();

    if !as400.is_empty() {
        return Ok((as400, Strategy::As400));
    }

    let scanned: Vec<LineItem> = lines::scan(text)
        .into_iter()
        .filter(|m| seen.insert(m.item_number.clone()))
        .map(|m| build_item(m.item_number, m.price, m.date.or_else(|| report_date.clone())))
        .collect();

    if scanned.is_empty() {
        return Err(ExtractError::NoItems);
    }
    Ok((scanned, Strategy::LineScan))
}

fn build_item(item_number: String, price: String, date: Option<String>) -> LineItem {
    let period = date
        .as_deref()
        .and_then(Period::from_date)
        .unwrap_or_else(Period::current);

    LineItem {
        description: derive_description(&item_number),
        item_number,
        price,
        quantity: 1,
        exception: String::new(),
        period: Some(period),
        date: date.unwrap_or_default(),
        department: String::new(),
    }
}
