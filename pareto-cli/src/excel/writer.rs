//! Write the Pareto and top products reports

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::services::analysis::{ParetoRow, TopProductRow};

const PARETO_SHEET: &str = "ParetoChart";
const TOP_PRODUCTS_SHEET: &str = "TopProducts";

/// A report line written as one spreadsheet row of numeric cells
trait ReportRow {
    const HEADERS: &'static [&'static str];

    fn write(&self, sheet: &mut Worksheet, row: u32, decimals: &Format) -> Result<(), XlsxError>;
}

impl ReportRow for ParetoRow {
    const HEADERS: &'static [&'static str] = &["Step", "Cumulative % Count", "Cumulative % Sales"];

    fn write(&self, sheet: &mut Worksheet, row: u32, decimals: &Format) -> Result<(), XlsxError> {
        sheet.write_number(row, 0, self.group)?;
        sheet.write_number_with_format(row, 1, number(self.cumulative_percent_count), decimals)?;
        sheet.write_number_with_format(row, 2, number(self.cumulative_percent_sales), decimals)?;
        Ok(())
    }
}

impl ReportRow for TopProductRow {
    const HEADERS: &'static [&'static str] = &["PRD_ID", "Sales Share (%)", "Total Sales"];

    fn write(&self, sheet: &mut Worksheet, row: u32, decimals: &Format) -> Result<(), XlsxError> {
        sheet.write_number(row, 0, self.product_id)?;
        sheet.write_number_with_format(row, 1, number(self.sales_share_percent), decimals)?;
        sheet.write_number_with_format(row, 2, number(self.total_sales), decimals)?;
        Ok(())
    }
}

fn number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Header row plus one row per entry, on a sheet named `sheet_name`
fn fill_sheet<R: ReportRow>(
    sheet: &mut Worksheet,
    sheet_name: &str,
    rows: &[R],
) -> Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    let decimals = Format::new().set_num_format("0.00");

    sheet.set_name(sheet_name)?;
    for (col, header) in R::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        sheet.set_column_width(col as u16, 20)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        row.write(sheet, idx as u32 + 1, &decimals)?;
    }
    Ok(())
}

/// Write the Pareto steps; `with_chart` adds a line chart of both
/// cumulative series beside the table.
pub fn write_pareto_report(rows: &[ParetoRow], path: &Path, with_chart: bool) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    fill_sheet(sheet, PARETO_SHEET, rows).context("Failed to build Pareto sheet")?;

    if with_chart && !rows.is_empty() {
        let last = rows.len() as u32;
        let mut chart = Chart::new(ChartType::Line);
        for (col, name) in [(1u16, "Cumulative % Count"), (2u16, "Cumulative % Sales")] {
            chart
                .add_series()
                .set_name(name)
                .set_categories((PARETO_SHEET, 1, 0, last, 0))
                .set_values((PARETO_SHEET, 1, col, last, col));
        }
        chart.title().set_name("Pareto");
        chart.x_axis().set_name("Step");
        chart.y_axis().set_name("%").set_max(100.0);
        sheet
            .insert_chart(1, 4, &chart)
            .context("Failed to insert Pareto chart")?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Pareto report ({} steps) exported to: {}", rows.len(), path.display());
    Ok(())
}

/// Write the products making up the target share of sales
pub fn write_top_products_report(rows: &[TopProductRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    fill_sheet(sheet, TOP_PRODUCTS_SHEET, rows).context("Failed to build top products sheet")?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Top products report ({} products) exported to: {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assert_number(cell: &Data, expected: f64) {
        match cell {
            Data::Float(f) => assert!((f - expected).abs() < 1e-9, "{f} != {expected}"),
            other => panic!("expected a number, got {other:?}"),
        }
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<Data>>) {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let names = workbook.sheet_names().to_vec();
        let range = workbook.worksheet_range(&names[0]).unwrap();
        (names, range.rows().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_pareto_report_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ParetoChart.xlsx");
        let rows = vec![
            ParetoRow {
                group: 1,
                cumulative_percent_count: dec("33.33"),
                cumulative_percent_sales: dec("60.00"),
            },
            ParetoRow {
                group: 2,
                cumulative_percent_count: dec("100.00"),
                cumulative_percent_sales: dec("100.00"),
            },
        ];

        write_pareto_report(&rows, &path, true).unwrap();

        let (names, cells) = read_back(&path);
        assert_eq!(names, vec![PARETO_SHEET.to_string()]);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0][0], Data::String("Step".to_string()));
        assert_eq!(cells[0][1], Data::String("Cumulative % Count".to_string()));
        assert_eq!(cells[0][2], Data::String("Cumulative % Sales".to_string()));
        assert_number(&cells[1][0], 1.0);
        assert_number(&cells[1][1], 33.33);
        assert_number(&cells[1][2], 60.0);
        assert_number(&cells[2][0], 2.0);
        assert_number(&cells[2][2], 100.0);
    }

    #[test]
    fn test_empty_reports_have_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let pareto = dir.path().join("p.xlsx");
        let top = dir.path().join("t.xlsx");

        write_pareto_report(&[], &pareto, true).unwrap();
        write_top_products_report(&[], &top).unwrap();

        let (_, cells) = read_back(&pareto);
        assert_eq!(cells.len(), 1);
        let (names, cells) = read_back(&top);
        assert_eq!(names, vec![TOP_PRODUCTS_SHEET.to_string()]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0][0], Data::String("PRD_ID".to_string()));
    }

    #[test]
    fn test_top_products_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TopProducts.xlsx");
        let rows = vec![TopProductRow {
            product_id: 10,
            sales_share_percent: dec("100.00"),
            total_sales: dec("25.50"),
        }];

        write_top_products_report(&rows, &path).unwrap();

        let (_, cells) = read_back(&path);
        assert_number(&cells[1][0], 10.0);
        assert_number(&cells[1][1], 100.0);
        assert_number(&cells[1][2], 25.5);
    }

    #[test]
    fn test_unwritable_destination() {
        let err = write_top_products_report(&[], Path::new("/nonexistent/dir/t.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Failed to save Excel file"));
    }
}
