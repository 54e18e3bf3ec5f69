//! Command-line configuration for the ferrochart server.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--host` | `0.0.0.0` | Listen address |
//! | `--port` | `8000` | Listen port |
//! | `--market-suffix` | `.NS` | Suffix appended to bare tickers |
//! | `--timeout-ms` | `10000` | Provider request timeout |
//! | `--yahoo-base-url` | `https://query1.finance.yahoo.com` | Provider base URL |
//! | `--cors` | off | Allow cross-origin browser clients |
//!
//! Log verbosity is controlled through `RUST_LOG` (default `info`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use ferrochart_core::{DEFAULT_MARKET_SUFFIX, DEFAULT_TIMEOUT_MS, YAHOO_BASE_URL};

/// Stock chart API serving daily OHLC bars as JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "ferrochart", author, version, about)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Exchange suffix appended to tickers that do not already end with it.
    #[arg(long, default_value = DEFAULT_MARKET_SUFFIX)]
    pub market_suffix: String,

    /// Timeout for each provider request, in milliseconds.
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Base URL of the Yahoo Finance chart API.
    #[arg(long, default_value = YAHOO_BASE_URL)]
    pub yahoo_base_url: String,

    /// Answer CORS preflights and allow any origin.
    #[arg(long)]
    pub cors: bool,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces_port_8000() {
        let cli = Cli::try_parse_from(["ferrochart"]).expect("defaults parse");

        assert_eq!(cli.listen_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(cli.market_suffix, ".NS");
        assert_eq!(cli.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!cli.cors);
    }

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::try_parse_from([
            "ferrochart",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--market-suffix",
            ".BO",
            "--cors",
        ])
        .expect("flags parse");

        assert_eq!(cli.listen_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(cli.market_suffix, ".BO");
        assert!(cli.cors);
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["ferrochart", "--timeout-ms", "0"]).is_err());
    }
}
