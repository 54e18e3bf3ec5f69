//! Price provider adapters.

pub mod yahoo;

pub use yahoo::{YahooChartSource, YAHOO_BASE_URL};
