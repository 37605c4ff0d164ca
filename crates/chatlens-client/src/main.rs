//! `chatlens` command-line dashboard.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use chatlens_client::events::{LogNotifier, Notification, NotificationKind, Notifier};
use chatlens_client::render::{render, RenderOptions};
use chatlens_client::{init_tracing, ApiClient, ClientConfig, Dashboard, Outcome};

#[derive(Parser, Debug)]
#[command(name = "chatlens", version, about = "Communication Insight Extractor dashboard")]
struct Cli {
    /// Insights API base URL (overrides CHATLENS_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Sample message batch (overrides CHATLENS_SAMPLE_PATH)
    #[arg(long, global = true)]
    sample: Option<PathBuf>,

    /// Print the view state as JSON instead of the rendered dashboard
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Show what the backend currently holds
    Status,
    /// Upload the sample batch
    LoadSample,
    /// Run analysis over the stored messages
    Analyze,
    /// Load the sample batch, then run analysis
    Demo,
}

/// Prints notifications to stderr, like toasts, and logs them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        eprintln!("[{marker}] {}", notification.message);
        LogNotifier.notify(notification);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base);
    }
    if let Some(sample) = &cli.sample {
        config = config.with_sample_path(sample);
    }
    info!(api_base = %config.api_base, command = ?cli.command, "Starting chatlens");

    let dashboard = Dashboard::new(
        ApiClient::from_config(&config),
        ConsoleNotifier,
        config.sample_path.clone(),
    );
    dashboard.load_existing().await;

    let mut outcomes = Vec::new();
    if matches!(cli.command, Command::LoadSample | Command::Demo) {
        outcomes.push(dashboard.load_sample().await);
    }
    if matches!(cli.command, Command::Analyze | Command::Demo) {
        outcomes.push(dashboard.run_analysis().await);
    }

    let state = dashboard.state();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        let color = !cli.no_color && std::io::stdout().is_terminal();
        print!("{}", render(&state, RenderOptions { color }));
    }

    // A skipped action means it was disabled, e.g. analysis with no messages.
    let failed = outcomes.iter().any(|o| !matches!(o, Outcome::Completed));
    if failed {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
