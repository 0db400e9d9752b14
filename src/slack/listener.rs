//! Socket Mode listener.
//!
//! slack-morphism delivers events to plain `fn` callbacks, so the event router
//! travels in the listener's user state. Typed events are turned back into
//! their JSON bodies and routed from there, which keeps the handlers free of
//! SDK types.

use std::sync::Arc;

use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::*;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::errors::BotError;
use crate::events::EventRouter;
use crate::worker::stop_requested;

async fn handle_push_event(
    event: SlackPushEventCallback,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> UserCallbackResult<()> {
    let router = {
        let guard = states.read().await;
        match guard.get_user_state::<Arc<EventRouter>>() {
            Some(router) => Arc::clone(router),
            None => {
                error!("Event router missing from listener state");
                return Ok(());
            }
        }
    };

    match event.event {
        SlackEventCallbackBody::Message(message) => match serde_json::to_value(&message) {
            Ok(payload) => {
                let outcome = router.handle_message_json(&payload).await;
                debug!(outcome = ?outcome, "Message event handled");
            }
            Err(e) => warn!(error = %e, "Failed to encode message event"),
        },
        SlackEventCallbackBody::ReactionAdded(reaction) => match serde_json::to_value(&reaction) {
            Ok(payload) => {
                let outcome = router.handle_reaction_json(&payload).await;
                debug!(outcome = ?outcome, "Reaction event handled");
            }
            Err(e) => warn!(error = %e, "Failed to encode reaction event"),
        },
        _ => {}
    }

    Ok(())
}

fn slack_error_handler(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> HttpStatusCode {
    warn!(error = %err, "Slack socket mode error");
    HttpStatusCode::OK
}

/// Connect to Slack over Socket Mode and dispatch events until the connection
/// ends or `shutdown` is signalled.
///
/// # Errors
///
/// Returns an error if the HTTP connector cannot be built or the initial
/// connection with the app-level token fails.
pub async fn run_socket_mode(
    app_token: &str,
    router: Arc<EventRouter>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), BotError> {
    let connector = SlackClientHyperConnector::new()
        .map_err(|e| BotError::GeneralError(format!("Failed to create Slack socket mode connector: {e}")))?;
    let client = Arc::new(SlackHyperClient::new(connector));

    let callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

    let environment = Arc::new(
        SlackClientEventsListenerEnvironment::new(client)
            .with_error_handler(slack_error_handler)
            .with_user_state(router),
    );

    let listener = SlackClientSocketModeListener::new(
        &SlackClientSocketModeConfig::new(),
        environment,
        callbacks,
    );

    let app_token = SlackApiToken::new(SlackApiTokenValue(app_token.to_string()));
    listener
        .listen_for(&app_token)
        .await
        .map_err(|e| BotError::ApiError(format!("Socket mode connection failed: {e}")))?;

    info!("Slack socket mode connected");

    tokio::select! {
        exit_code = listener.serve() => {
            info!(exit_code, "Slack socket mode listener stopped");
        }
        () = stop_requested(&mut shutdown) => {
            info!("Slack socket mode shutting down");
            listener.shutdown().await;
        }
    }

    Ok(())
}
