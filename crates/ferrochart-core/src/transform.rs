//! Row coercion from provider cells into [`OhlcRecord`]s.
//!
//! A row that fails coercion is recorded as a [`RowError`] and skipped; the
//! rest of the sequence is still processed.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::{Cell, CoercionError, OhlcRecord, PriceRow, ReportDate, RowError};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Records kept plus rows dropped, both in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformed {
    pub records: Vec<OhlcRecord>,
    pub skipped: Vec<RowError>,
}

impl Transformed {
    fn push(mut self, index: usize, outcome: Result<OhlcRecord, CoercionError>) -> Self {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(cause) => self.skipped.push(RowError { index, cause }),
        }
        self
    }
}

/// Coerce every row, keeping successes and failures apart.
pub fn transform_rows(rows: &[PriceRow]) -> Transformed {
    rows.iter()
        .enumerate()
        .fold(Transformed::default(), |acc, (index, row)| {
            acc.push(index, coerce_row(row))
        })
}

pub fn coerce_row(row: &PriceRow) -> Result<OhlcRecord, CoercionError> {
    Ok(OhlcRecord {
        date: coerce_date(&row.report_date)?,
        open: coerce_float("open", &row.open)?,
        high: coerce_float("high", &row.high)?,
        low: coerce_float("low", &row.low)?,
        close: coerce_float("close", &row.close)?,
        volume: coerce_integer("volume", &row.volume)?,
    })
}

fn coerce_date(value: &ReportDate) -> Result<String, CoercionError> {
    let formatted = match value {
        ReportDate::Timestamp(ts) => ts.date().format(DATE_FORMAT),
        ReportDate::Date(date) => date.format(DATE_FORMAT),
        ReportDate::Text(text) => return Ok(text.clone()),
        ReportDate::Missing => return Err(CoercionError::Missing { field: "report_date" }),
    };

    formatted.map_err(|e| CoercionError::DateFormat {
        reason: e.to_string(),
    })
}

fn coerce_float(field: &'static str, value: &Cell) -> Result<f64, CoercionError> {
    let number = match value {
        Cell::Float(number) => *number,
        Cell::Int(number) => *number as f64,
        Cell::Text(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| CoercionError::NotANumber {
                    field,
                    value: text.clone(),
                })?
        }
        Cell::Null => return Err(CoercionError::Missing { field }),
    };

    if !number.is_finite() {
        return Err(CoercionError::NonFinite {
            field,
            value: number,
        });
    }
    Ok(number)
}

fn coerce_integer(field: &'static str, value: &Cell) -> Result<i64, CoercionError> {
    match value {
        Cell::Int(number) => Ok(*number),
        Cell::Float(number) => {
            if !number.is_finite() {
                return Err(CoercionError::NonFinite {
                    field,
                    value: *number,
                });
            }
            let truncated = number.trunc();
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(CoercionError::OutOfRange {
                    field,
                    value: *number,
                });
            }
            Ok(truncated as i64)
        }
        Cell::Text(text) => {
            text.trim()
                .parse::<i64>()
                .map_err(|_| CoercionError::NotAnInteger {
                    field,
                    value: text.clone(),
                })
        }
        Cell::Null => Err(CoercionError::Missing { field }),
    }
}
