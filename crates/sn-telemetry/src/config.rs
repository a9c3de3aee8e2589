//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or an EnvFilter directive)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// Whether to emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Network identifier (mainnet, testnet, devnet, fakechain)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "sn-finality".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "mainnet".to_string(),
        }
    }
}

fn flag_on(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn flag_off(value: &str) -> bool {
    value.eq_ignore_ascii_case("false") || value == "0"
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: sn-finality)
    /// - `SN_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SN_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SN_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `SN_NETWORK`: Network name (default: mainnet)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("SN_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("SN_CONSOLE_OUTPUT")
                .map(|v| !flag_off(&v))
                .unwrap_or(defaults.console_output),

            json_logs: lookup("SN_JSON_LOGS")
                .map(|v| flag_on(&v))
                .unwrap_or(is_container),

            network: lookup("SN_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Service name with the network appended, except on mainnet.
    pub fn full_service_name(&self) -> String {
        if self.network == "mainnet" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.network)
        }
    }
}
