//! Price source contract and the fetch stage of the chart pipeline.
//!
//! A [`PriceSource`] hands back raw [`PriceRow`]s for a normalized symbol.
//! [`fetch_prices`] folds "no result" and "zero rows" into a single
//! [`PriceFetch::Empty`] and passes provider errors through untouched.
//!
//! ```rust,ignore
//! use ferrochart_core::{fetch_prices, normalize, PriceFetch, YahooChartSource};
//!
//! async fn rows(source: &YahooChartSource) -> Result<usize, ferrochart_core::SourceError> {
//!     match fetch_prices(source, &normalize("INFY")).await? {
//!         PriceFetch::Rows(rows) => Ok(rows.len()),
//!         PriceFetch::Empty => Ok(0),
//!     }
//! }
//! ```

use std::error::Error as StdError;
use std::fmt::{Debug, Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::{PriceRow, TickerSymbol};

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure or unexpected upstream status.
    Unavailable,
    /// Upstream answered but the payload could not be understood.
    InvalidResponse,
}

/// Structured provider error.
///
/// `Display` renders only the message; that text is what clients see. The
/// optional cause is kept for server-side diagnostics.
#[derive(Clone)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    cause: Option<Arc<dyn StdError + Send + Sync>>,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidResponse, message)
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
        }
    }

    /// Message followed by every cause in the chain, for logs only.
    pub fn chain(&self) -> Vec<String> {
        let mut lines = vec![self.message.clone()];
        let mut next = self.source();
        while let Some(cause) = next {
            lines.push(cause.to_string());
            next = cause.source();
        }
        lines
    }
}

impl Debug for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceError")
            .field("kind", &self.kind)
            .field("code", &self.code())
            .field("message", &self.message)
            .field("cause", &self.cause.as_ref().map(|cause| format!("{cause:?}")))
            .finish()
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for SourceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Historical price provider.
///
/// `Ok(None)` means the provider has nothing for the symbol. Implementations
/// must be `Send + Sync`; one instance serves every request.
pub trait PriceSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the full daily price history for `symbol`, oldest row first.
    fn price_history<'a>(
        &'a self,
        symbol: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<PriceRow>>, SourceError>> + Send + 'a>>;
}

/// Result of the fetch stage.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceFetch {
    Rows(Vec<PriceRow>),
    /// No result at all, or a result with zero rows.
    Empty,
}

/// Fetch rows for `symbol`, collapsing absent and empty results into [`PriceFetch::Empty`].
pub async fn fetch_prices<S>(source: &S, symbol: &TickerSymbol) -> Result<PriceFetch, SourceError>
where
    S: PriceSource + ?Sized,
{
    Ok(match source.price_history(symbol).await? {
        Some(rows) if !rows.is_empty() => PriceFetch::Rows(rows),
        _ => PriceFetch::Empty,
    })
}
