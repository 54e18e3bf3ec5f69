//! # Domain Models
//!
//! Request-scoped types that flow through the chart pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TickerSymbol`] | Symbol carrying its market suffix |
//! | [`MarketSuffix`] | Suffix appended by the normalizer (default `.NS`) |
//! | [`PriceRow`] | Raw provider row with loosely typed cells |
//! | [`OhlcRecord`] | Typed OHLCV record returned to clients |
//!
//! Nothing here outlives a single request.

mod ohlc;
mod price_row;
mod symbol;

pub use ohlc::OhlcRecord;
pub use price_row::{Cell, PriceRow, ReportDate};
pub use symbol::{normalize, MarketSuffix, TickerSymbol, DEFAULT_MARKET_SUFFIX};
