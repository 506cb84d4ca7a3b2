//! Telemetry configuration from environment variables.

use std::env;

const DEFAULT_SERVICE_NAME: &str = "confidential-ledger";

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Organization whose peer this process serves, if any
    pub org_id: Option<String>,

    /// Log level filter (trace, debug, info, warn, error, or directives)
    pub log_level: String,

    /// Whether to write log lines to stdout at all
    pub console_output: bool,

    /// Whether to format log lines as JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            org_id: None,
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: confidential-ledger)
    /// - `CT_ORG_ID`: Organization served by this process (default: unset)
    /// - `CT_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `CT_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),

            org_id: env::var("CT_ORG_ID").ok().filter(|v| !v.trim().is_empty()),

            log_level: env::var("CT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("CT_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),

            json_logs: env::var("CT_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(is_container),
        }
    }

    /// Configuration for a peer of one organization.
    pub fn for_organization(org_id: &str) -> Self {
        let mut config = Self::from_env();
        config.org_id = Some(org_id.to_string());
        config
    }

    /// Service name qualified by organization.
    pub fn full_service_name(&self) -> String {
        match &self.org_id {
            Some(org) => format!("{}-{}", self.service_name, org),
            None => self.service_name.clone(),
        }
    }
}

/// `true`/`1` and `false`/`0`, case-insensitive. Anything else is `default`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => default,
    }
}
