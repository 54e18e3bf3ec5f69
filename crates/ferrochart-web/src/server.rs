use std::sync::Arc;

use ferrochart_core::{ChartPipeline, MarketSuffix, ReqwestHttpClient, YahooChartSource};
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::Cli;
use crate::error::ServerError;
use crate::routes::{router, AppState};
use crate::telemetry::shutdown_signal;

/// Wire the Yahoo provider into the router and serve until a shutdown signal.
pub async fn run(cli: Cli) -> Result<(), ServerError> {
    let http_client = Arc::new(ReqwestHttpClient::new()?);
    let source = YahooChartSource::new(http_client)
        .with_base_url(cli.yahoo_base_url.as_str())
        .with_timeout_ms(cli.timeout_ms);
    let suffix = MarketSuffix::new(cli.market_suffix.as_str());
    let pipeline = ChartPipeline::new(Arc::new(source), suffix);
    info!(
        market_suffix = %pipeline.suffix(),
        timeout_ms = cli.timeout_ms,
        provider = %cli.yahoo_base_url,
        "chart pipeline ready"
    );

    let app = router(AppState::new(pipeline), cli.cors);

    let addr = cli.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, cors = cli.cors, "ferrochart listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}
