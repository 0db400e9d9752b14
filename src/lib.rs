//! Coffee Bot - A Slack bot that keeps coffee orders inside serving hours and
//! tells people when their drink is ready.
//!
//! The bot runs three independent tasks:
//! 1. A Socket Mode listener that handles `message` and `reaction_added` events
//! 2. A keepalive HTTP endpoint polled by external uptime monitors
//! 3. An announcement loop that periodically broadcasts which station is serving
//!
//! # Architecture
//!
//! The system uses:
//! - slack-morphism for Slack API interactions and Socket Mode
//! - axum for the keepalive route
//! - chrono-tz for the ordering-hours policy
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use coffee_bot::core::clock::SystemClock;
//! use coffee_bot::core::config::AppConfig;
//! use coffee_bot::events::EventRouter;
//! use coffee_bot::slack::SlackClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     coffee_bot::setup_logging();
//!
//!     let config = Arc::new(AppConfig::from_env()?);
//!     let platform = Arc::new(SlackClient::new(config.slack_bot_token.clone()));
//!     let router = EventRouter::new(config, platform, Arc::new(SystemClock));
//!
//!     let payload = serde_json::json!({
//!         "channel": "C12345678",
//!         "user": "U12345678",
//!         "text": "one latte please",
//!         "ts": "1721609600.000100"
//!     });
//!     router.handle_message_json(&payload).await;
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod events;
pub mod slack;
pub mod web;
pub mod worker;

/// Configure structured logging with JSON format.
///
/// Installs a tracing-subscriber JSON formatter filtered by `RUST_LOG`
/// (defaults to `info`). Calling it more than once is harmless; later calls
/// leave the first subscriber in place.
///
/// # Example
///
/// ```
/// coffee_bot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
