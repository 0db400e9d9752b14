//! Keepalive endpoint polled by external uptime monitors.

use std::future::IntoFuture;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::errors::BotError;
use crate::slack::response_builder::KEEPALIVE_TEXT;
use crate::worker::stop_requested;

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

pub async fn alive() -> &'static str {
    KEEPALIVE_TEXT
}

/// Bind `0.0.0.0:port` and serve the keepalive route on a background task.
///
/// The server stops once `shutdown` carries `true`. If it stops on its own
/// first, it sends `true` so the rest of the bot shuts down with it.
///
/// # Errors
///
/// Returns an error if the port cannot be bound.
pub async fn spawn(port: u16, shutdown: Arc<watch::Sender<bool>>) -> Result<(), BotError> {
    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;

    info!(bind_address = %address, "Keepalive endpoint started");

    let mut stop = shutdown.subscribe();
    let server = axum::serve(listener, router())
        .with_graceful_shutdown(async move { stop_requested(&mut stop).await });

    tokio::spawn(async move { supervise(server, &shutdown).await });

    Ok(())
}

/// Run `server` to completion. Returns `true` if it ended without a stop
/// having been requested, in which case a stop is requested.
pub async fn supervise<F>(server: F, shutdown: &watch::Sender<bool>) -> bool
where
    F: IntoFuture<Output = std::io::Result<()>>,
{
    let result = server.await;
    if *shutdown.borrow() {
        info!("Keepalive endpoint stopped");
        return false;
    }

    match result {
        Ok(()) => error!("Keepalive endpoint exited unexpectedly"),
        Err(e) => error!(error = %e, "Keepalive endpoint terminated unexpectedly"),
    }
    shutdown.send_replace(true);
    true
}
