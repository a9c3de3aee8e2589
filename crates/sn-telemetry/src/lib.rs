//! # SN Telemetry
//!
//! Logging setup for the checkpoint and blink subsystems. Library crates
//! only emit `tracing` events; the node binary calls [`init_logging`] once.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sn_telemetry::{init_logging, TelemetryConfig};
//!
//! let _guard = init_logging(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `sn-finality` | Service name in logs |
//! | `SN_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SN_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `SN_JSON_LOGS` | `false` | JSON lines output |
//! | `SN_NETWORK` | `mainnet` | Network name |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, LoggingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
