//! Behavior-driven tests for the `/api/stock/:symbol` endpoint.
//!
//! Requests go through the full axum router (trace, panic, and CORS layers
//! included) with a scripted price source standing in for Yahoo.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use ferrochart_core::{
    Cell, ChartPipeline, MarketSuffix, PriceRow, PriceSource, SourceError, TickerSymbol,
};
use ferrochart_web::{router, AppState, ErrorBody};
use serde_json::Value;
use time::macros::{date, datetime};
use tower::ServiceExt;

type Scripted = Result<Option<Vec<PriceRow>>, SourceError>;

enum Script {
    Answer(Scripted),
    Panic,
}

struct ScriptedSource(Script);

impl PriceSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn price_history<'a>(
        &'a self,
        _symbol: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Scripted> + Send + 'a>> {
        let answer = match &self.0 {
            Script::Answer(answer) => answer.clone(),
            Script::Panic => panic!("provider exploded"),
        };
        Box::pin(async move { answer })
    }
}

fn app_with(script: Script, cors: bool) -> Router {
    let pipeline = ChartPipeline::new(Arc::new(ScriptedSource(script)), MarketSuffix::default());
    router(AppState::new(pipeline), cors)
}

fn app(answer: Scripted) -> Router {
    app_with(Script::Answer(answer), false)
}

/// Status plus the raw body text, so field order can be asserted exactly.
async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    send_text(app, Method::GET, uri).await
}

async fn send_text(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let text = String::from_utf8(bytes.to_vec()).expect("body should be UTF-8");
    (status, text)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, text) = get_text(app, uri).await;
    let json = serde_json::from_str(&text).expect("body should be JSON");
    (status, json)
}

fn detail_of(body: Value) -> String {
    serde_json::from_value::<ErrorBody>(body)
        .expect("error body should be {detail}")
        .detail
}

// =============================================================================
// 200 OK
// =============================================================================

#[tokio::test]
async fn when_symbol_has_data_endpoint_returns_ohlc_array() {
    let row = PriceRow::new(date!(2024 - 01 - 02), 10_i64, 12_i64, 9_i64, 11_i64, 1000_i64);
    let (status, body) = get_text(app(Ok(Some(vec![row]))), "/api/stock/AAA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"[{"date":"2024-01-02","open":10.0,"high":12.0,"low":9.0,"close":11.0,"volume":1000}]"#
    );
}

#[tokio::test]
async fn timestamps_are_rendered_as_calendar_dates() {
    let row = PriceRow::new(
        datetime!(2024-06-03 09:15:00 +05:30),
        100.5,
        101.0,
        99.0,
        100.0,
        Cell::Float(5e5),
    );
    let (status, body) = get(app(Ok(Some(vec![row]))), "/api/stock/TCS").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["date"], "2024-06-03");
    assert_eq!(body[0]["volume"], 500000);
    assert!(body[0]["volume"].is_i64());
    assert!(body[0]["open"].is_f64());
}

#[tokio::test]
async fn malformed_rows_are_absent_not_null_filled() {
    let good = PriceRow::new(date!(2024 - 01 - 02), 1.0, 2.0, 0.5, 1.5, 10_i64);
    let mut bad = good.clone();
    bad.volume = Cell::from("ten");

    let (status, body) = get(
        app(Ok(Some(vec![good.clone(), bad, good]))),
        "/api/stock/INFY",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().expect("array body");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| !r["volume"].is_null()));
}

#[tokio::test]
async fn when_every_row_is_malformed_endpoint_returns_empty_array() {
    let bad = PriceRow::new(date!(2024 - 01 - 02), Cell::Null, 2.0, 0.5, 1.5, 10_i64);
    let (status, body) = get(app(Ok(Some(vec![bad]))), "/api/stock/BAD").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

// =============================================================================
// 404 Not Found
// =============================================================================

#[tokio::test]
async fn when_provider_has_no_rows_endpoint_returns_404_with_detail() {
    let (status, body) = get_text(app(Ok(Some(Vec::new()))), "/api/stock/ZZZ.NS").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"detail":"No data found for symbol ZZZ.NS"}"#);
}

#[tokio::test]
async fn when_provider_returns_nothing_detail_uses_normalized_symbol() {
    let (status, body) = get(app(Ok(None)), "/api/stock/ZZZ").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail_of(body), "No data found for symbol ZZZ.NS");
}

#[tokio::test]
async fn unknown_paths_return_json_not_found() {
    for uri in ["/api/stock/", "/api/stocks/AAA", "/"] {
        let (status, body) = get_text(app(Ok(None)), uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, r#"{"detail":"Not Found"}"#, "{uri}");
    }
}

#[tokio::test]
async fn wrong_method_on_known_route_returns_json_405() {
    let (status, body) = send_text(app(Ok(None)), Method::POST, "/api/stock/AAA").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, r#"{"detail":"Method Not Allowed"}"#);

    let (status, body) = send_text(app(Ok(None)), Method::DELETE, "/health").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, r#"{"detail":"Method Not Allowed"}"#);
}

// =============================================================================
// 500 Internal Server Error
// =============================================================================

#[tokio::test]
async fn when_provider_fails_endpoint_returns_500_with_message() {
    let error = SourceError::unavailable("yahoo transport error: request timeout")
        .with_cause(std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed"));
    let (status, body) = get(app(Err(error)), "/api/stock/TCS").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = detail_of(body);
    assert_eq!(detail, "yahoo transport error: request timeout");
    assert!(!detail.contains("deadline elapsed"));
}

#[tokio::test]
async fn when_provider_panics_endpoint_returns_500_detail_object() {
    let (status, body) = get(app_with(Script::Panic, false), "/api/stock/TCS").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = detail_of(body);
    assert_eq!(detail, "internal server error");
    assert!(!detail.contains("provider exploded"));
}

// =============================================================================
// Ambient routes and layers
// =============================================================================

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (status, body) = get(app(Ok(None)), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn cors_flag_allows_any_origin() {
    let response = app_with(Script::Answer(Ok(None)), true)
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router is infallible");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
