use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use std::path::{Path, PathBuf};

use crate::{report::PricedOrder, table::Key};

/// Column headings of an order document, left to right.
pub const COLUMNS: [&str; 6] = [
    "ORDER ID",
    "ITEM NUMBER",
    "PRODUCT LINE",
    "ITEM QUANTITY",
    "ITEM PRICE",
    "TOTAL PRICE",
];

const WIDTHS: [f64; 6] = [12.0, 10.0, 20.0, 14.0, 18.0, 18.0];
const MONEY_FORMAT: &str = "$#,##0.00";
const SHEET_NAME_MAX: usize = 31;
const EXACT_INT_MAX: u64 = 1 << 53;

/// Returns the document file name for `order_id`, e.g. `Order_1001.xlsx`.
///
/// Path separators in the ID are replaced so the file always lands in the
/// output directory itself.
#[must_use]
pub fn order_file_name(order_id: &Key) -> String {
    let id = order_id.to_string().replace(['/', '\\'], "_");
    format!("Order_{id}.xlsx")
}

/// Returns the worksheet name for `order_id`, made legal for Excel.
///
/// Excel refuses `[ ] : * ? / \` anywhere in a sheet name and an apostrophe
/// at either end, and allows at most 31 characters.
#[must_use]
pub fn sheet_name(order_id: &Key) -> String {
    let mut name: String = format!("Order_{order_id}")
        .replace(['[', ']', ':', '*', '?', '/', '\\'], "_")
        .chars()
        .take(SHEET_NAME_MAX)
        .collect();
    if name.ends_with('\'') {
        name.pop();
        name.push('_');
    }
    name
}

/// Writes `order` to its own spreadsheet in `dir`, replacing any earlier
/// copy, and returns the document's path.
///
/// The sheet has a header row, one row per item, and directly beneath the
/// last item a "Grand Total" row. Prices and totals use the currency format
/// `$#,##0.00`.
///
/// # Errors
///
/// Returns any error from building or saving the workbook, for example if
/// `dir` is not writable.
pub fn write_order(order: &PricedOrder, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(order_file_name(&order.order_id));
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_sheet(worksheet, order)
        .with_context(|| format!("laying out order {}", order.order_id))?;
    workbook
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "wrote {} ({} items, grand total {})",
        path.display(),
        order.lines.len(),
        order.grand_total
    );
    Ok(path)
}

fn fill_sheet(worksheet: &mut Worksheet, order: &PricedOrder) -> Result<(), XlsxError> {
    let header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let money = Format::new().set_num_format(MONEY_FORMAT);

    worksheet.set_name(sheet_name(&order.order_id))?;
    for (col, (name, width)) in (0u16..).zip(COLUMNS.iter().zip(WIDTHS)) {
        worksheet.write_string_with_format(0, col, *name, &header)?;
        worksheet.set_column_width(col, width)?;
    }

    let mut row = 1u32;
    for line in &order.lines {
        write_key(worksheet, row, 0, &line.order_id)?;
        write_key(worksheet, row, 1, &line.item_number)?;
        worksheet.write_string(row, 2, &line.product_line)?;
        worksheet.write_number(row, 3, line.qty)?;
        worksheet.write_number_with_format(row, 4, line.price.dollars(), &money)?;
        worksheet.write_number_with_format(row, 5, line.total.dollars(), &money)?;
        row += 1;
    }

    worksheet.write_string(row, 4, "Grand Total")?;
    worksheet.write_number_with_format(row, 5, order.grand_total.dollars(), &money)?;
    Ok(())
}

fn write_key(worksheet: &mut Worksheet, row: u32, col: u16, key: &Key) -> Result<(), XlsxError> {
    match key {
        // Excel stores numbers as doubles, exact only up to 2^53.
        #[allow(clippy::cast_precision_loss)]
        Key::Int(n) if n.unsigned_abs() <= EXACT_INT_MAX => {
            worksheet.write_number(row, col, *n as f64)?
        }
        Key::Int(n) => worksheet.write_string(row, col, n.to_string())?,
        Key::Text(s) => worksheet.write_string(row, col, s)?,
    };
    Ok(())
}
