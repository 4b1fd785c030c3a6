use crate::config::Config;
use crate::error::ApiError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up logging for the CLI.
///
/// Logs to a daily rolling file; with `verbose` the subscriber also logs
/// to stderr so diagnostic output stays separate from response bodies
/// printed on stdout. Creates the log directory if it doesn't exist.
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(
    log_file: Option<&String>,
    verbose: bool,
) -> Result<(String, WorkerGuard), ApiError> {
    // Try to load config to get log file path if specified
    let config_log_path = Config::load().await.ok().and_then(|c| c.log_file_path);

    let custom_log_path = log_file.or(config_log_path.as_ref());
    let (log_dir, log_file_name) = match custom_log_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path.parent().unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("qcs-client.log");
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), "qcs-client.log".to_string()),
    };

    // Create log directory if it doesn't exist
    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            ApiError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    // Set up a rolling file appender that creates a new log file each day
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must be kept alive for the duration of the program
    // to ensure logs are flushed properly
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry();
    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(
            EnvFilter::from_default_env().add_directive("qcs_client=info".parse().unwrap()),
        );

    if verbose {
        registry
            .with(file_layer)
            .with(
                fmt::Layer::new()
                    .with_writer(std::io::stderr)
                    .with_filter(
                        EnvFilter::from_default_env()
                            .add_directive("qcs_client=debug".parse().unwrap()),
                    ),
            )
            .init();
    } else {
        registry.with(file_layer).init();
    }

    let log_path = Path::new(&log_dir)
        .join(&log_file_name)
        .to_string_lossy()
        .to_string();
    Ok((log_path, guard))
}
