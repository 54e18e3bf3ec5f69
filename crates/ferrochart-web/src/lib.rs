//! # Ferrochart Web
//!
//! axum front end for the ferrochart chart pipeline.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cli`] | clap flags (listen address, suffix, provider) |
//! | [`error`] | `ApiError` → `{detail}` responses, `ServerError` exit codes |
//! | [`routes`] | Router, handlers, panic and trace layers |
//! | [`server`] | Provider wiring, bind, graceful shutdown |
//! | [`telemetry`] | tracing subscriber and shutdown signal |

pub mod cli;
pub mod error;
pub mod routes;
pub mod server;
pub mod telemetry;

pub use cli::Cli;
pub use error::{ApiError, ErrorBody, ServerError};
pub use routes::{router, AppState};
