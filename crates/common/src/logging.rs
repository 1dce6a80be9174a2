// SymViz - Symbolic Execution Tree Visualizer
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration for SymViz components
//!
//! Provides centralized logging setup with:
//! - Colorful console output with structured formatting
//! - Optional file logging to a temporary directory
//! - Environment variable support (RUST_LOG)

use eyre::{Result, WrapErr};
use std::{env, fs, path::PathBuf, sync::Once};
use tracing::Level;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Initialize logging for a SymViz component
///
/// This function sets up:
/// - Colorful, structured console logging with timestamps
/// - File logging to a temporary directory with daily rotation (optional)
/// - Environment variable support for log levels (RUST_LOG)
/// - Default INFO level if no RUST_LOG is set
///
/// # Arguments
/// * `component_name` - Name of the component (e.g., "symviz", "symviz-replay")
/// * `enable_file_logging` - Whether to also write logs to `<tmp>/symviz-logs/<component>`
///
/// # Examples
/// ```rust,no_run
/// use symviz_common::logging;
///
/// fn main() -> eyre::Result<()> {
///     logging::init_logging("symviz", false)?;
///     tracing::info!("Visualization session started");
///     Ok(())
/// }
/// ```
pub fn init_logging(component_name: &str, enable_file_logging: bool) -> Result<()> {
    let env_filter = default_filter(Level::INFO)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(true)
        .pretty();

    if enable_file_logging {
        let log_dir = create_log_directory(component_name)?;

        let file_appender = rolling::daily(&log_dir, format!("{component_name}.log"));
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        // The writer thread must outlive every span of the process.
        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(LocalTime::rfc_3339())
            .with_ansi(false)
            .with_writer(non_blocking_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer.with_filter(EnvFilter::from_default_env()))
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {e}"))?;

        tracing::info!(
            component = component_name,
            log_dir = %log_dir.display(),
            "Logging initialized with console and file output"
        );
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {e}"))?;

        tracing::info!(component = component_name, "Logging initialized with console output only");
    }

    log_environment_info(component_name);

    Ok(())
}

/// `RUST_LOG` if set, `level` otherwise
fn default_filter(level: Level) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .wrap_err("Failed to create environment filter")
}

/// Create log directory in system temp folder
fn create_log_directory(component_name: &str) -> Result<PathBuf> {
    let log_dir = env::temp_dir().join("symviz-logs").join(component_name);

    fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", log_dir.display()))?;

    Ok(log_dir)
}

fn log_environment_info(component_name: &str) {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let args: Vec<String> = env::args().collect();

    tracing::info!(
        component = component_name,
        rust_log = %rust_log,
        args = ?args,
        "Environment information"
    );

    if let Ok(current_dir) = env::current_dir() {
        tracing::debug!(working_directory = %current_dir.display(), "Working directory");
    }
}

/// Initialize simple logging (console only, compact formatting)
///
/// # Arguments
/// * `level` - The default log level to use when RUST_LOG is not set
pub fn init_simple_logging(level: Level) -> Result<()> {
    let env_filter = default_filter(level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize simple logging: {e}"))?;

    Ok(())
}

static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests, can be called any number of times
///
/// Console-only output at `default_level` (INFO when `None`), overridden by
/// RUST_LOG when set.
///
/// # Usage
/// ```rust
/// use symviz_common::logging;
/// use tracing::info;
///
/// logging::ensure_test_logging(None);
/// info!("This works in any test");
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        // A subscriber may already be installed by the harness; that is fine.
        let _ = init_simple_logging(default_level.unwrap_or(Level::INFO));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, warn};

    #[test]
    fn test_logging_functions_work() {
        ensure_test_logging(None);

        info!("Test info message");
        warn!("Test warning message");
        debug!("Test debug message");
        error!("Test error message");
    }

    #[test]
    fn test_log_directory_creation() {
        let log_dir = create_log_directory("test-component").unwrap();
        assert!(log_dir.exists());
        assert!(log_dir.to_string_lossy().contains("symviz-logs"));
        assert!(log_dir.to_string_lossy().contains("test-component"));
    }

    #[test]
    fn test_repeated_initialization_is_graceful() {
        ensure_test_logging(None);

        // A global subscriber is already installed, so both attempts must fail without panicking.
        assert!(init_logging("test-repeat-1", false).is_err());
        assert!(init_simple_logging(Level::DEBUG).is_err());

        info!("Logging still works after repeated initialization attempts");
    }
}
