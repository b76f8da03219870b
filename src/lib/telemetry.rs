//! Telemetry initialization and launch event helpers.

use std::{env, ffi::OsString};

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Default log level name (`trace`, `debug`, `info`, `warn`, `error`) used when `RUST_LOG` is unset.
pub const VERBOSE_ENV: &str = "WRAPPER_VERBOSE";

/// Initialize `tracing` and format developer logs.
///
/// `RUST_LOG` wins; otherwise the level named by `WRAPPER_VERBOSE` applies,
/// `debug` for unrecognised names, `info` when unset.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let verbose = env::var(VERBOSE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty());
    let directive = default_directive(verbose.as_deref());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))?;

    if let Some(value) = verbose.filter(|value| verbose_level(value).is_none()) {
        warn!(
            target: "debug_launcher::telemetry",
            "Unknown logging level: {VERBOSE_ENV}={value}; using {directive}"
        );
    }
    Ok(())
}

fn default_directive(verbose: Option<&str>) -> &'static str {
    match verbose {
        Some(value) => verbose_level(value).unwrap_or("debug"),
        None => "info",
    }
}

fn verbose_level(value: &str) -> Option<&'static str> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Payload for logging the selected launch as structured telemetry.
#[derive(Debug, Serialize)]
pub struct LaunchModeTelemetry<'a> {
    pub backend: &'a str,
    pub port: &'a str,
    pub wait: bool,
    pub argv: &'a [OsString],
}

/// Emit the launch mode to `tracing`.
pub fn emit_launch_mode(telemetry: &LaunchModeTelemetry<'_>) {
    info!(
        target: "debug_launcher::dispatch",
        backend = telemetry.backend,
        port = telemetry.port,
        wait = telemetry.wait,
        argv = ?telemetry.argv,
        "Handing off to debug backend"
    );
}
