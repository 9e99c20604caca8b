//! Coerce one spreadsheet row into a `SalesRecord`

use anyhow::{Context, Result};
use calamine::Data;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Column positions in the source sheet
mod cols {
    pub const CUSTOMER_ID: usize = 0;
    pub const SALE_DATE: usize = 1;
    pub const PRODUCT_ID: usize = 2;
    pub const QUANTITY: usize = 3;
    pub const UNIT_PRICE: usize = 4;
}

/// Largest value a DECIMAL(8,2) column can hold
const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

static DATE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid date regex"));

/// One sale as stored in the VENTES table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub customer_id: i32,
    pub sale_date: NaiveDate,
    pub product_id: i32,
    pub quantity: i16,
    /// Scale 2, within `0 ..= 999999.99`
    pub unit_price: Decimal,
}

impl SalesRecord {
    /// Unit price as an integer count of hundredths
    pub fn price_hundredths(&self) -> Result<i64> {
        let mut price = self.unit_price;
        price.rescale(2);
        i64::try_from(price.mantissa())
            .with_context(|| format!("Unit price out of range: {}", self.unit_price))
    }
}

/// Why a row was skipped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("column {column} ({name}) is empty")]
    Missing { column: usize, name: &'static str },
    #[error("column {column} ({name}) is not an integer: {value}")]
    NotAnInteger {
        column: usize,
        name: &'static str,
        value: String,
    },
    #[error("sale date is not dd/mm/yyyy: {0}")]
    BadDate(String),
    #[error("quantity must be between 0 and 32767: {0}")]
    BadQuantity(String),
    #[error("unit price is not a decimal between 0 and 999999.99: {0}")]
    BadPrice(String),
}

/// Parse a data row (header excluded). Extra trailing columns are ignored.
pub fn parse_row(row: &[Data]) -> Result<SalesRecord, RowError> {
    let customer_id = int_cell(row, cols::CUSTOMER_ID, "customer id")?;
    let sale_date = date_cell(row)?;
    let product_id = int_cell(row, cols::PRODUCT_ID, "product id")?;
    let quantity = quantity_cell(row)?;
    let unit_price = price_cell(row)?;

    Ok(SalesRecord {
        customer_id,
        sale_date,
        product_id,
        quantity,
        unit_price,
    })
}

fn cell<'a>(row: &'a [Data], column: usize, name: &'static str) -> Result<&'a Data, RowError> {
    match row.get(column) {
        None | Some(Data::Empty) => Err(RowError::Missing { column, name }),
        Some(Data::String(s)) if s.trim().is_empty() => Err(RowError::Missing { column, name }),
        Some(data) => Ok(data),
    }
}

/// Integer value of a numeric or text cell; floats must be whole
fn integer_value(data: &Data) -> Option<i64> {
    match data {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 => {
            Some(*f as i64)
        }
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn int_cell(row: &[Data], column: usize, name: &'static str) -> Result<i32, RowError> {
    let data = cell(row, column, name)?;
    integer_value(data)
        .and_then(|i| i32::try_from(i).ok())
        .ok_or_else(|| RowError::NotAnInteger {
            column,
            name,
            value: data.to_string(),
        })
}

fn quantity_cell(row: &[Data]) -> Result<i16, RowError> {
    let data = cell(row, cols::QUANTITY, "quantity")?;
    integer_value(data)
        .and_then(|i| i16::try_from(i).ok())
        .filter(|q| *q >= 0)
        .ok_or_else(|| RowError::BadQuantity(data.to_string()))
}

fn date_cell(row: &[Data]) -> Result<NaiveDate, RowError> {
    let data = cell(row, cols::SALE_DATE, "sale date")?;
    // Only text cells are accepted; native date cells carry no dd/mm/yyyy layout
    let parsed = match data {
        Data::String(s) => parse_date_text(s.trim()),
        _ => None,
    };
    parsed.ok_or_else(|| RowError::BadDate(data.to_string()))
}

/// Strict `dd/mm/yyyy`: two-digit day and month, four-digit year
fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let caps = DATE_TEXT.captures(text)?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn price_cell(row: &[Data]) -> Result<Decimal, RowError> {
    let data = cell(row, cols::UNIT_PRICE, "unit price")?;
    let parsed = match data {
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::Float(f) => Decimal::try_from(*f).ok(),
        Data::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    // Negative prices are rejected too, which keeps revenue non-negative
    parsed
        .map(|p| p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .filter(|p| !p.is_sign_negative() && *p <= MAX_UNIT_PRICE)
        .map(|mut p| {
            p.rescale(2);
            p
        })
        .ok_or_else(|| RowError::BadPrice(data.to_string()))
}
