use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};

use crate::data_source::{PriceSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, DEFAULT_TIMEOUT_MS};
use crate::{Cell, PriceRow, ReportDate, TickerSymbol};

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

const NOT_FOUND_CODE: &str = "Not Found";

/// Daily price history from Yahoo Finance's v8 chart endpoint.
#[derive(Clone)]
pub struct YahooChartSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl YahooChartSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(YAHOO_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_url(&self, symbol: &TickerSymbol) -> String {
        format!(
            "{}/v8/finance/chart/{}?range=max&interval=1d",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        )
    }

    async fn fetch_chart(
        &self,
        symbol: &TickerSymbol,
    ) -> Result<Option<Vec<PriceRow>>, SourceError> {
        let request = HttpRequest::get(self.chart_url(symbol))
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
                .with_cause(e)
        })?;

        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(upstream_status_error(&response));
        }

        let chart: YahooChartResponse = serde_json::from_str(&response.body).map_err(|e| {
            SourceError::invalid_response(format!("failed to parse yahoo chart: {e}"))
                .with_cause(e)
        })?;

        parse_chart(chart)
    }
}

impl PriceSource for YahooChartSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn price_history<'a>(
        &'a self,
        symbol: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<PriceRow>>, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_chart(symbol))
    }
}

fn upstream_status_error(response: &HttpResponse) -> SourceError {
    let api_error = serde_json::from_str::<YahooChartResponse>(&response.body)
        .ok()
        .and_then(|chart| chart.chart.error);

    match api_error {
        Some(error) => SourceError::unavailable(format!(
            "yahoo returned status {}: {}",
            response.status,
            error.describe()
        )),
        None => SourceError::unavailable(format!("yahoo returned status {}", response.status)),
    }
}

fn parse_chart(chart: YahooChartResponse) -> Result<Option<Vec<PriceRow>>, SourceError> {
    if let Some(error) = chart.chart.error {
        if error.code == NOT_FOUND_CODE {
            return Ok(None);
        }
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}",
            error.describe()
        )));
    }

    let Some(result) = chart
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(None);
    };

    let Some(timestamps) = result.timestamp else {
        return Ok(None);
    };

    let offset = result
        .meta
        .and_then(|meta| UtcOffset::from_whole_seconds(meta.gmtoffset).ok())
        .unwrap_or(UtcOffset::UTC);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let rows = timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| PriceRow {
            report_date: exchange_date(ts, offset),
            open: cell_at(&quote.open, i),
            high: cell_at(&quote.high, i),
            low: cell_at(&quote.low, i),
            close: cell_at(&quote.close, i),
            volume: cell_at(&quote.volume, i),
        })
        .collect();

    Ok(Some(rows))
}

/// Bars are stamped at the session open; shifting to exchange time keeps the trading day.
fn exchange_date(ts: i64, offset: UtcOffset) -> ReportDate {
    OffsetDateTime::from_unix_timestamp(ts)
        .map(|utc| ReportDate::Timestamp(utc.to_offset(offset)))
        .unwrap_or(ReportDate::Missing)
}

fn cell_at(values: &[Option<f64>], index: usize) -> Cell {
    values.get(index).copied().flatten().into()
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

impl YahooChartError {
    fn describe(&self) -> String {
        match &self.description {
            Some(description) => format!("{} ({description})", self.code),
            None => self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
