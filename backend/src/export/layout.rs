//! Sheet layout shared by the Excel and Google Sheets exporters.
//!
//! ```text
//! row 1  REFUND AUDIT LOG SUMMARY            (merged A1:E1)
//! row 2  Item # | Department | Qty | Total Sell | Period
//! row 3+ one row per line item
//! last   "" | Grand Total | =SUM(C..) | =SUM(D..) | ""
//! ```

use crate::models::{parse_price, LineItem};

pub const SHEET_NAME: &str = "REFUND AUDIT LOG";
pub const TITLE: &str = "REFUND AUDIT LOG SUMMARY";
pub const HEADERS: [&str; 5] = ["Item #", "Department", "Qty", "Total Sell", "Period"];

/// 1-based sheet row of the first data row.
pub const FIRST_DATA_ROW: usize = 3;

/// One exported data row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub item_number: String,
    pub department: String,
    pub quantity: i64,
    pub total_sell: f64,
    pub period: String,
}

impl From<&LineItem> for ExportRow {
    fn from(item: &LineItem) -> Self {
        Self {
            item_number: item.item_number.clone(),
            department: item.department.clone(),
            quantity: item.quantity,
            total_sell: parse_price(&item.price),
            period: item.period_code(),
        }
    }
}

/// Grand total formulas, present when there is at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalRow {
    /// 1-based sheet row of the totals.
    pub row: usize,
    pub quantity_formula: String,
    pub sell_formula: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub rows: Vec<ExportRow>,
    pub total: Option<TotalRow>,
}

impl SheetLayout {
    pub fn build(items: &[LineItem]) -> Self {
        let rows: Vec<ExportRow> = items.iter().map(ExportRow::from).collect();
        let total = (!rows.is_empty()).then(|| {
            let last = FIRST_DATA_ROW + rows.len() - 1;
            TotalRow {
                row: last + 1,
                quantity_formula: format!("=SUM(C{}:C{})", FIRST_DATA_ROW, last),
                sell_formula: format!("=SUM(D{}:D{})", FIRST_DATA_ROW, last),
            }
        });
        Self { rows, total }
    }

    /// Display width per column: `max(longest value, 10) + 2`.
    pub fn column_widths(&self) -> [usize; 5] {
        let mut widths = HEADERS.map(|h| h.len());
        for row in &self.rows {
            let cells = [
                row.item_number.len(),
                row.department.len(),
                row.quantity.to_string().len(),
                format!("{:.2}", row.total_sell).len(),
                row.period.len(),
            ];
            for (width, len) in widths.iter_mut().zip(cells) {
                *width = (*width).max(len);
            }
        }
        widths.map(|w| w.max(10) + 2)
    }
}
