/*
[INPUT]:  CLI arguments, YAML configuration file, TODOLINK_* environment
[OUTPUT]: Running task list TUI, or a validated configuration in dry-run mode
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or logging setup
*/

mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use todolink::{AppConfig, TaskBackend};

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "todolink", version, about = "Task list with image attachments backed by a hosted database")]
struct Cli {
    /// YAML config file (default: <config dir>/todolink/config.yaml)
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Also write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if args.dry_run {
        init_tracing(&args.log_level)?;
        info!(config_path = ?args.config_path, "starting todolink dry-run");
        let config = load_config(args.config_path.as_deref())?;
        config.build_client()?;
        info!(
            service_url = %config.service_url,
            table = %config.table,
            bucket = %config.bucket,
            "dry-run requested; configuration validated"
        );
        return Ok(());
    }

    let log_buffer = LogBuffer::shared(LOG_BUFFER_CAPACITY);
    let _file_guard = init_tui_tracing(&args.log_level, args.log_file.as_deref(), log_buffer.clone())?;

    let config = load_config(args.config_path.as_deref())?;
    let backend: Arc<dyn TaskBackend> = Arc::new(config.build_client()?);
    info!(service_url = %config.service_url, "starting todolink");

    tui::run_tui_with_log(backend, &config, log_buffer).await
}

/// Logs to stderr; used when no UI is running
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// Logs into the Logs tab, and into `log_file` when given
fn init_tui_tracing(
    log_level: &str,
    log_file: Option<&Path>,
    log_buffer: LogBufferHandle,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let buffer_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(LogWriterFactory::new(log_buffer));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name.to_string_lossy())
                .build(directory)
                .with_context(|| format!("open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(buffer_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = AppConfig::load(path).context("load config")?;
    config.validate().context("validate config")?;
    Ok(config)
}
