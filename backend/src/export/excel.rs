//! Excel export via `rust_xlsxwriter`.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

use super::layout::{SheetLayout, FIRST_DATA_ROW, HEADERS, SHEET_NAME, TITLE};
use crate::error::ExportResult;
use crate::models::LineItem;

/// A workbook written to disk.
#[derive(Debug, Clone)]
pub struct ExcelExport {
    pub filename: String,
    pub path: PathBuf,
}

/// Pick `refund_audit_log_<timestamp>.xlsx`, suffixed when the name is taken.
fn unique_filename(export_dir: &Path) -> String {
    let stem = format!("refund_audit_log_{}", Local::now().format("%Y%m%d_%H%M%S"));
    let mut filename = format!("{}.xlsx", stem);
    let mut n = 1;
    while export_dir.join(&filename).exists() {
        filename = format!("{}_{}.xlsx", stem, n);
        n += 1;
    }
    filename
}

/// Write the items to a new workbook in `export_dir`.
pub fn export_to_excel(items: &[LineItem], export_dir: &Path) -> ExportResult<ExcelExport> {
    fs::create_dir_all(export_dir)?;

    let layout = SheetLayout::build(items);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center);
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD3D3D3))
        .set_align(FormatAlign::Center);
    let money_format = Format::new().set_num_format("$#,##0.00");
    let bold = Format::new().set_bold();

    worksheet.merge_range(0, 0, 0, (HEADERS.len() - 1) as u16, TITLE, &title_format)?;
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(1, col as u16, *header, &header_format)?;
    }

    // Sheet rows are 1-based in the layout, 0-based here.
    let first = (FIRST_DATA_ROW - 1) as u32;
    for (i, row) in layout.rows.iter().enumerate() {
        let r = first + i as u32;
        worksheet.write_string(r, 0, &row.item_number)?;
        worksheet.write_string(r, 1, &row.department)?;
        worksheet.write_number(r, 2, row.quantity as f64)?;
        worksheet.write_number_with_format(r, 3, row.total_sell, &money_format)?;
        worksheet.write_string(r, 4, &row.period)?;
    }

    if let Some(total) = &layout.total {
        let r = (total.row - 1) as u32;
        worksheet.write_string_with_format(r, 1, "Grand Total", &bold)?;
        worksheet.write_formula_with_format(r, 2, total.quantity_formula.as_str(), &bold)?;
        worksheet.write_formula_with_format(r, 3, total.sell_formula.as_str(), &money_format)?;
    }

    for (col, width) in layout.column_widths().iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    let filename = unique_filename(export_dir);
    let path = export_dir.join(&filename);
    workbook.save(&path)?;

    Ok(ExcelExport { filename, path })
}
