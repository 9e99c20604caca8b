//! Spreadsheet input and report output

mod reader;
mod writer;

pub use reader::read_first_sheet;
pub use writer::{write_pareto_report, write_top_products_report};
