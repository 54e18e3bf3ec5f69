//! # Ferrochart Core
//!
//! Symbol normalization, price providers, and OHLC shaping behind the
//! ferrochart stock chart API.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance chart) |
//! | [`data_source`] | `PriceSource` trait, fetch stage, `SourceError` |
//! | [`domain`] | `TickerSymbol`, `PriceRow`, `OhlcRecord` |
//! | [`error`] | Row coercion errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | Normalize → fetch → transform, as a `ChartOutcome` |
//! | [`transform`] | Per-row coercion with partial-failure tolerance |
//!
//! ## Flow
//!
//! ```text
//! raw symbol ──▶ MarketSuffix::normalize ──▶ PriceSource::price_history
//!                                                   │
//!                     ┌─────────────────────────────┼──────────────────┐
//!                     ▼                             ▼                  ▼
//!               PriceFetch::Empty            PriceFetch::Rows     SourceError
//!                     │                             │                  │
//!                     ▼                             ▼                  ▼
//!                 NotFound (404)        transform_rows ─▶ Success   Failed (500)
//!                                                     (200)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ferrochart_core::{ChartPipeline, MarketSuffix, ReqwestHttpClient, YahooChartSource};
//!
//! let http = Arc::new(ReqwestHttpClient::new()?);
//! let pipeline = ChartPipeline::new(
//!     Arc::new(YahooChartSource::new(http)),
//!     MarketSuffix::default(),
//! );
//! let outcome = pipeline.handle("INFY").await;
//! assert_eq!(outcome.symbol().as_str(), "INFY.NS");
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod transform;

pub use adapters::{YahooChartSource, YAHOO_BASE_URL};

pub use data_source::{fetch_prices, PriceFetch, PriceSource, SourceError, SourceErrorKind};

pub use domain::{
    normalize, Cell, MarketSuffix, OhlcRecord, PriceRow, ReportDate, TickerSymbol,
    DEFAULT_MARKET_SUFFIX,
};

pub use error::{CoercionError, RowError};

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, DEFAULT_TIMEOUT_MS,
};

pub use pipeline::{ChartOutcome, ChartPipeline};

pub use transform::{coerce_row, transform_rows, Transformed};
