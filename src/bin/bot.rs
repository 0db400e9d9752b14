use std::sync::Arc;

use anyhow::{Context, Result};
use coffee_bot::core::clock::SystemClock;
use coffee_bot::core::config::AppConfig;
use coffee_bot::events::EventRouter;
use coffee_bot::slack::{ChatPlatform, SlackClient, run_socket_mode};
use coffee_bot::worker::Announcer;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    coffee_bot::setup_logging();

    let config = Arc::new(AppConfig::from_env().context("Failed to load configuration")?);
    let platform: Arc<dyn ChatPlatform> = Arc::new(SlackClient::new(config.slack_bot_token.clone()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let shutdown_tx = Arc::new(shutdown_tx);

    coffee_bot::web::spawn(config.port, Arc::clone(&shutdown_tx))
        .await
        .context("Failed to start keepalive endpoint")?;

    let announcer = Announcer::from_config(Arc::clone(&platform), &config);
    let announcements = tokio::spawn(announcer.run(shutdown_rx.clone()));

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            return;
        }
        info!("Shutdown requested");
        shutdown_tx.send_replace(true);
    });

    let router = Arc::new(EventRouter::new(
        Arc::clone(&config),
        platform,
        Arc::new(SystemClock),
    ));
    run_socket_mode(&config.slack_app_token, router, shutdown_rx)
        .await
        .context("Slack socket mode listener failed")?;

    announcements.abort();
    Ok(())
}
