//! Domain models for the refund audit log.
//!
//! - [`LineItem`] - One audit entry (item number, price, quantity, period)
//! - [`Period`] - Calendar month code `P01`..`P12`
//! - [`ExportType`] - Export target (Excel file or Google spreadsheet)
//! - [`ExportRecord`] - Metadata about a completed export

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// Period
// =============================================================================

/// Calendar month code used to group audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(u8);

impl Period {
    /// All twelve periods in calendar order.
    pub fn all() -> impl Iterator<Item = Period> {
        (1..=12).map(Period)
    }

    /// Build a period from a month number (1-12).
    pub fn from_month(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Period(month as u8))
    }

    /// Parse a `Pnn` code. Accepts `P4` as well as `P04`.
    pub fn from_code(code: &str) -> Option<Self> {
        let digits = code.trim().strip_prefix(['P', 'p'])?;
        let month: u32 = digits.parse().ok()?;
        Self::from_month(month)
    }

    /// Period of the month component of an `MM/DD/YY` style date.
    pub fn from_date(date: &str) -> Option<Self> {
        let (month, _) = date.trim().split_once('/')?;
        Self::from_month(month.parse().ok()?)
    }

    /// Period of the current local month.
    pub fn current() -> Self {
        Period(Local::now().month() as u8)
    }

    pub fn month(&self) -> u32 {
        self.0 as u32
    }

    pub fn code(&self) -> String {
        format!("P{:02}", self.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:02}", self.0)
    }
}

impl Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Period::from_code(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid period code '{}'", raw)))
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A single audit entry as edited in the results table.
///
/// `description` and `date` are derived from `item_number` and `period` by
/// the client on every save; the server stores what it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_price")]
    pub price: String,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub exception: String,
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub date: String,
    /// Department code from AS400 reports.
    #[serde(default)]
    pub department: String,
}

fn default_price() -> String {
    "0.00".to_string()
}

fn default_quantity() -> i64 {
    1
}

fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) => f as i64,
        Raw::Text(s) => parse_quantity(&s),
    })
}

impl LineItem {
    /// A fresh item with default price, quantity and period.
    pub fn new(item_number: impl Into<String>) -> Self {
        let item_number = item_number.into();
        let period = Period::current();
        Self {
            description: derive_description(&item_number),
            date: derive_date(period, Local::now().year()),
            item_number,
            price: default_price(),
            quantity: 1,
            exception: String::new(),
            period: Some(period),
            department: String::new(),
        }
    }

    /// Period code for export: the stored period, else the month of `date`,
    /// else `P00`.
    pub fn period_code(&self) -> String {
        self.period
            .or_else(|| Period::from_date(&self.date))
            .map(|p| p.code())
            .unwrap_or_else(|| "P00".to_string())
    }
}

/// `"Item " + item_number`.
pub fn derive_description(item_number: &str) -> String {
    format!("Item {}", item_number)
}

/// `MM/01/YY` for the given period and four-digit year.
pub fn derive_date(period: Period, year: i32) -> String {
    format!("{:02}/01/{:02}", period.month(), year.rem_euclid(100))
}

/// Parse a quantity, including the AS400 trailing-minus form (`"1-"` is -1).
///
/// Anything unparseable counts as 1.
pub fn parse_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Some(digits) = raw.strip_suffix('-') {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return digits.parse::<i64>().map(|n| -n).unwrap_or(1);
        }
    }
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        return raw.parse().unwrap_or(1);
    }
    1
}

/// Parse a price string as printed on audit reports.
///
/// Strips `Y` markers and thousands separators; a trailing minus makes the
/// amount negative. Anything unparseable counts as 0.00.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| *c != 'Y' && *c != ',').collect();
    let cleaned = cleaned.trim();
    let (digits, negative) = match cleaned.strip_suffix('-') {
        Some(d) => (d, true),
        None => (cleaned, false),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return 0.0;
    }
    match digits.parse::<f64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => 0.0,
    }
}

// =============================================================================
// Export Records
// =============================================================================

/// Export target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Excel,
    Google,
}

impl ExportType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "excel" => Some(Self::Excel),
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Google => "google",
        }
    }
}

/// Metadata about a completed export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub export_type: ExportType,
    pub filename: String,
    pub item_count: usize,
    /// Path of the written workbook (Excel only).
    pub file_path: Option<String>,
    /// Public spreadsheet URL (Google only).
    pub sheet_url: Option<String>,
}

impl ExportRecord {
    pub fn excel(filename: impl Into<String>, file_path: impl Into<String>, item_count: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            export_type: ExportType::Excel,
            filename: filename.into(),
            item_count,
            file_path: Some(file_path.into()),
            sheet_url: None,
        }
    }

    pub fn google(title: impl Into<String>, sheet_url: impl Into<String>, item_count: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            export_type: ExportType::Google,
            filename: title.into(),
            item_count,
            file_path: None,
            sheet_url: Some(sheet_url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_codes() {
        assert_eq!(Period::from_code("P04").unwrap().month(), 4);
        assert_eq!(Period::from_code("p4").unwrap().code(), "P04");
        assert!(Period::from_code("P13").is_none());
        assert!(Period::from_code("P00").is_none());
        assert!(Period::from_code("April").is_none());
        assert_eq!(Period::all().count(), 12);
    }

    #[test]
    fn test_period_from_date() {
        assert_eq!(Period::from_date("07/15/24"), Period::from_month(7));
        assert!(Period::from_date("2024-07-15").is_none());
    }

    #[test]
    fn test_derived_fields() {
        let p = Period::from_month(4).unwrap();
        assert_eq!(derive_date(p, 2025), "04/01/25");
        assert_eq!(derive_date(p, 2009), "04/01/09");
        assert_eq!(derive_description("123456"), "Item 123456");
    }

    #[test]
    fn test_parse_quantity_as400_forms() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 1- "), -1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("-"), 1);
    }

    #[test]
    fn test_parse_price_forms() {
        assert_eq!(parse_price("12.50"), 12.5);
        assert_eq!(parse_price("1,234.00"), 1234.0);
        assert_eq!(parse_price("4.99-"), -4.99);
        assert_eq!(parse_price("Y9.99"), 9.99);
        assert_eq!(parse_price("n/a"), 0.0);
    }

    #[test]
    fn test_line_item_deserialization_defaults() {
        let item: LineItem = serde_json::from_str(r#"{"item_number": "555"}"#).unwrap();
        assert_eq!(item.price, "0.00");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.exception, "");
        assert_eq!(item.period, None);

        let item: LineItem = serde_json::from_str(
            r#"{"item_number": "555", "quantity": "2-", "period": "P11", "date": "11/01/25"}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, -2);
        assert_eq!(item.period_code(), "P11");
    }

    #[test]
    fn test_period_code_fallbacks() {
        let mut item = LineItem::new("1");
        item.period = None;
        item.date = "03/14/25".to_string();
        assert_eq!(item.period_code(), "P03");
        item.date.clear();
        assert_eq!(item.period_code(), "P00");
    }

    #[test]
    fn test_export_type_serde() {
        assert_eq!(ExportType::parse("Excel"), Some(ExportType::Excel));
        assert_eq!(ExportType::parse("pdf"), None);
        assert_eq!(serde_json::to_string(&ExportType::Google).unwrap(), "\"google\"");
    }
}
