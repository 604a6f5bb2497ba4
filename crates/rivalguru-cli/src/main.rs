use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rivalguru_cli::{render, BackendClient, ViewState, LOADING_MESSAGE};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rivalguru-cli")]
#[command(about = "Compare a website against its competitors")]
struct Cli {
    /// Website to analyze (e.g. microsoft.com)
    website: String,
    /// Base URL of the analysis service
    #[arg(long, env = "RIVALGURU_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    backend_url: String,
    /// Print the raw JSON response instead of the comparison table
    #[arg(long)]
    json: bool,
    /// Seconds to wait for the service before giving up
    #[arg(long, default_value = "330")]
    timeout_secs: u64,
    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, env = "RIVALGURU_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let (state, request) = ViewState::submit(&cli.website);
    let Some(website) = request else {
        return Ok(finish(state, cli.json));
    };

    let client = BackendClient::new(&cli.backend_url, Duration::from_secs(cli.timeout_secs))?;
    let spinner = loading_spinner();
    let result = client.analyze(&website).await;
    spinner.finish_and_clear();

    Ok(finish(state.complete(result), cli.json))
}

/// Prints the final state. Errors go to stderr and fail the process.
fn finish(state: ViewState, raw_json: bool) -> ExitCode {
    let text = render(&state, raw_json);
    if matches!(state, ViewState::Error(_)) {
        eprintln!("{text}");
        return ExitCode::FAILURE;
    }
    if !text.is_empty() {
        println!("{text}");
    }
    ExitCode::SUCCESS
}

fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(LOADING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests;
