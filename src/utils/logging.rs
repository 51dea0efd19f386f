use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use anyhow::Result;
use crate::ServiceConfig;
use crate::config::settings::{LogFormat, LoggingConfig};


#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "trace",
            LogLevel::DEBUG => "debug",
            LogLevel::INFO => "info",
            LogLevel::WARN => "warn",
            LogLevel::ERROR => "error",
        }
    }
}


pub fn run(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) -> Result<()> {
    init_logging(&resolve_logging_config(service_config, arg_log_level));
    Ok(())
}

/// CLI level wins over the config file, the config file over the `info` default.
pub fn resolve_logging_config(
    service_config: &ServiceConfig,
    arg_log_level: Option<LogLevel>,
) -> LoggingConfig {
    let config = service_config
        .settings
        .logging
        .clone()
        .unwrap_or_default();

    let level = arg_log_level
        .map(|level| level.as_str().to_owned())
        .unwrap_or(config.level);

    LoggingConfig::new(level, config.format)
}


/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_writer(std::io::stderr)
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr)
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}
