//! HTTP routes.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/stock/:symbol` | Daily OHLC bars for a ticker |
//! | `GET /health` | Liveness probe |

use std::any::Any;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ferrochart_core::{ChartOutcome, ChartPipeline, OhlcRecord};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ApiError;

/// State shared by every request; the pipeline itself holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pipeline: ChartPipeline,
}

impl AppState {
    pub fn new(pipeline: ChartPipeline) -> Self {
        Self { pipeline }
    }
}

pub fn router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        .route(
            "/api/stock/:symbol",
            get(get_stock_data).fallback(method_not_allowed),
        )
        .route("/health", get(health).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn get_stock_data(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<OhlcRecord>>, ApiError> {
    let outcome = state.pipeline.handle(&symbol).await;
    let detail = outcome.detail().unwrap_or_default();

    match outcome {
        ChartOutcome::Success { records, .. } => Ok(Json(records)),
        ChartOutcome::NotFound { .. } => Err(ApiError::NotFound(detail)),
        ChartOutcome::Failed { .. } => Err(ApiError::Internal(detail)),
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound(String::from("Not Found"))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed(String::from("Method Not Allowed"))
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = message, "request handler panicked");

    ApiError::Internal(String::from("internal server error")).into_response()
}
