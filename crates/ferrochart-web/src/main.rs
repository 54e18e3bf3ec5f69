use std::process::ExitCode;

use clap::Parser;
use ferrochart_web::{server, telemetry, Cli};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing();

    match server::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, details = ?e, "ferrochart exited with error");
            ExitCode::from(e.exit_code())
        }
    }
}
