use anyhow::Context;
use queue_janitor::{telemetry, Config, Janitor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    telemetry::init_tracing(&config.common.log_level);

    tracing::info!("Starting queue janitor");
    tracing::info!(
        sonarr = %config.sonarr().url,
        radarr = %config.radarr().url,
        interval_secs = config.poll_interval_secs,
        "Configuration loaded"
    );

    let janitor = Janitor::new(&config)?;
    janitor.run_forever(config.poll_interval()).await;

    Ok(())
}
