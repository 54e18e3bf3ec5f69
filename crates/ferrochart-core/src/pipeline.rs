//! Request pipeline: normalize, fetch, transform.
//!
//! Every exit is a [`ChartOutcome`] value. "No rows from the provider" and
//! "every row failed coercion" are different outcomes: the first is
//! [`ChartOutcome::NotFound`], the second a successful empty series.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::data_source::{fetch_prices, PriceFetch, PriceSource, SourceError};
use crate::transform::transform_rows;
use crate::{MarketSuffix, OhlcRecord, TickerSymbol};

/// Terminal state of one chart request.
#[derive(Debug, Clone)]
pub enum ChartOutcome {
    Success {
        symbol: TickerSymbol,
        records: Vec<OhlcRecord>,
    },
    NotFound {
        symbol: TickerSymbol,
    },
    Failed {
        symbol: TickerSymbol,
        error: SourceError,
    },
}

impl ChartOutcome {
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::NotFound { .. } => 404,
            Self::Failed { .. } => 500,
        }
    }

    pub fn symbol(&self) -> &TickerSymbol {
        match self {
            Self::Success { symbol, .. }
            | Self::NotFound { symbol }
            | Self::Failed { symbol, .. } => symbol,
        }
    }

    /// Client-facing message for non-success outcomes.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::NotFound { symbol } => Some(format!("No data found for symbol {symbol}")),
            Self::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

/// Shared, stateless handler for chart requests.
#[derive(Clone)]
pub struct ChartPipeline {
    source: Arc<dyn PriceSource>,
    suffix: MarketSuffix,
}

impl ChartPipeline {
    pub fn new(source: Arc<dyn PriceSource>, suffix: MarketSuffix) -> Self {
        Self { source, suffix }
    }

    pub fn suffix(&self) -> &MarketSuffix {
        &self.suffix
    }

    pub async fn handle(&self, raw_symbol: &str) -> ChartOutcome {
        info!(raw_symbol, "received chart request");
        let symbol = self.suffix.normalize(raw_symbol);
        debug!(%symbol, source = self.source.name(), "fetching price history");

        let rows = match fetch_prices(&*self.source, &symbol).await {
            Ok(PriceFetch::Rows(rows)) => rows,
            Ok(PriceFetch::Empty) => {
                info!(%symbol, "no price data found");
                return ChartOutcome::NotFound { symbol };
            }
            Err(error) => {
                error!(
                    %symbol,
                    code = error.code(),
                    chain = ?error.chain(),
                    details = ?error,
                    "failed to fetch price history"
                );
                return ChartOutcome::Failed { symbol, error };
            }
        };

        info!(%symbol, rows = rows.len(), "price history fetched");

        let transformed = transform_rows(&rows);
        for skipped in &transformed.skipped {
            warn!(%symbol, index = skipped.index, cause = %skipped.cause, "skipping malformed row");
        }

        info!(
            %symbol,
            returned = transformed.records.len(),
            skipped = transformed.skipped.len(),
            "returning chart rows"
        );

        ChartOutcome::Success {
            symbol,
            records: transformed.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_status_and_detail() {
        let symbol = crate::normalize("ZZZ.NS");

        let not_found = ChartOutcome::NotFound {
            symbol: symbol.clone(),
        };
        assert_eq!(not_found.status_code(), 404);
        assert_eq!(
            not_found.detail().as_deref(),
            Some("No data found for symbol ZZZ.NS")
        );

        let failed = ChartOutcome::Failed {
            symbol: symbol.clone(),
            error: SourceError::unavailable("yahoo transport error: timeout"),
        };
        assert_eq!(failed.status_code(), 500);
        assert_eq!(
            failed.detail().as_deref(),
            Some("yahoo transport error: timeout")
        );

        let success = ChartOutcome::Success {
            symbol,
            records: Vec::new(),
        };
        assert_eq!(success.status_code(), 200);
        assert!(success.detail().is_none());
    }
}
