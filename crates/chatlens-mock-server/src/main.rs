use tracing::info;
use tracing_subscriber::EnvFilter;

use chatlens_mock_server::{api, AppState, CannedInsights, MockConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chatlens_mock_server=debug")),
        )
        .init();

    info!("Starting chatlens mock backend v{}", env!("CARGO_PKG_VERSION"));

    let config = MockConfig::from_env();
    info!(?config, "Loaded configuration");

    let canned = CannedInsights::load(config.insights_path.as_deref())?;
    let http_addr = config.http_addr;
    let state = AppState::new(config, canned);

    tokio::select! {
        result = api::serve(state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
