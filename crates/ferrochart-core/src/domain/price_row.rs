use std::fmt::{Display, Formatter};

use time::{Date, OffsetDateTime};

/// Date column of a provider row.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportDate {
    Timestamp(OffsetDateTime),
    Date(Date),
    /// Provider supplied a plain string; it is passed through untouched.
    Text(String),
    Missing,
}

impl From<OffsetDateTime> for ReportDate {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Date> for ReportDate {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for ReportDate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Loosely typed numeric cell as returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Float(f64),
    Int(i64),
    Text(String),
    Null,
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{value}'"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Float)
    }
}

/// One row of provider price history, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub report_date: ReportDate,
    pub open: Cell,
    pub high: Cell,
    pub low: Cell,
    pub close: Cell,
    pub volume: Cell,
}

impl PriceRow {
    pub fn new(
        report_date: impl Into<ReportDate>,
        open: impl Into<Cell>,
        high: impl Into<Cell>,
        low: impl Into<Cell>,
        close: impl Into<Cell>,
        volume: impl Into<Cell>,
    ) -> Self {
        Self {
            report_date: report_date.into(),
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: volume.into(),
        }
    }
}
