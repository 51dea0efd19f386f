use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tap_countdown::dashboard::TapDashboard;
use tap_countdown::presentation::TerminalView;
use tap_countdown::token::Tap;
use tap_countdown::utils::config_loader;
use tap_countdown::utils::logging;
use tap_countdown::utils::logging::LogLevel;
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "tap-countdown.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// id of the tap to request a token for
    #[arg(long, env = "TAP_ID")]
    tap_id: String,
    /// display label, defaults to the name returned by the dashboard
    #[arg(long, env = "TAP_NAME", default_value = "")]
    tap_name: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // -------------------------------
    // 1. Read args, load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 2. Build dashboard with terminal view
    // -------------------------------

    let view = Arc::new(TerminalView::new(std::io::stdout()));
    let mut dashboard = TapDashboard::from_config(&service_config, view)?;

    // -------------------------------
    // 3. Request token and run countdown until expiry or Ctrl-C
    // -------------------------------

    let tap = Tap::new(args.tap_id, args.tap_name);
    let token = match dashboard.generate_token(&tap).await {
        Ok(token) => token,
        Err(e) => {
            // already rendered by the view
            debug!("token request failed: {:#}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!("showing token for '{}'", token.issued_for);

    tokio::select! {
        expired = dashboard.countdown().wait_expired() => {
            info!("countdown finished, expired: {}", expired);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, closing dashboard");
        }
    }
    dashboard.close();

    Ok(ExitCode::SUCCESS)
}
