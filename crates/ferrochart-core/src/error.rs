use thiserror::Error;

/// Field-level failure while turning a [`PriceRow`](crate::PriceRow) into an
/// [`OhlcRecord`](crate::OhlcRecord).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionError {
    #[error("field '{field}' is missing")]
    Missing { field: &'static str },
    #[error("field '{field}' value {value} is not a number")]
    NotANumber { field: &'static str, value: String },
    #[error("field '{field}' value {value} is not finite")]
    NonFinite { field: &'static str, value: f64 },
    #[error("field '{field}' value {value} is not an integer")]
    NotAnInteger { field: &'static str, value: String },
    #[error("field '{field}' value {value} does not fit in a 64-bit integer")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("report date could not be formatted: {reason}")]
    DateFormat { reason: String },
}

impl CoercionError {
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field, .. }
            | Self::NonFinite { field, .. }
            | Self::NotAnInteger { field, .. }
            | Self::OutOfRange { field, .. } => field,
            Self::DateFormat { .. } => "report_date",
        }
    }
}

/// A provider row that was dropped, with its position in the provider output.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("row {index}: {cause}")]
pub struct RowError {
    pub index: usize,
    #[source]
    pub cause: CoercionError,
}
