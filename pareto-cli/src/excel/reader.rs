//! Read the sales sheet

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// All rows of the first worksheet, header included.
///
/// Accepts any workbook format calamine recognises by extension
/// (xlsx, xlsm, xlsb, xls, ods).
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<Data>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("Excel file has no sheets: {}", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    // Ranges start at the first used cell; pad back to A1 so column and
    // row positions are absolute
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Data>> = vec![Vec::new(); start_row as usize];
    rows.extend(range.rows().map(|r| {
        let mut row = vec![Data::Empty; start_col as usize];
        row.extend_from_slice(r);
        row
    }));
    log::debug!(
        "Read {} rows from sheet '{}' of {}",
        rows.len(),
        sheet_name,
        path.display()
    );
    Ok(rows)
}
