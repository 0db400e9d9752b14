//! Event handling for the `message` and `reaction_added` subscriptions

pub mod message;
pub mod reaction;

use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

pub use message::{MessageHandler, MessageOutcome};
pub use reaction::{ReactionHandler, ReactionOutcome};

use crate::core::clock::Clock;
use crate::core::config::AppConfig;
use crate::slack::event_parser::{parse_message_event, parse_reaction_event};
use crate::slack::platform::ChatPlatform;

/// Parses raw event bodies and hands them to the matching handler.
pub struct EventRouter {
    message_handler: MessageHandler,
    reaction_handler: ReactionHandler,
}

impl EventRouter {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, platform: Arc<dyn ChatPlatform>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_handler: MessageHandler::new(config, Arc::clone(&platform), clock),
            reaction_handler: ReactionHandler::new(platform),
        }
    }

    #[must_use]
    pub fn message_handler(&self) -> &MessageHandler {
        &self.message_handler
    }

    #[must_use]
    pub fn reaction_handler(&self) -> &ReactionHandler {
        &self.reaction_handler
    }

    /// Handle a `message` event body. Returns `None` if it could not be parsed.
    pub async fn handle_message_json(&self, payload: &Value) -> Option<MessageOutcome> {
        let correlation_id = Uuid::new_v4().to_string();
        let span = info_span!("message_event", correlation_id = %correlation_id);

        async {
            match parse_message_event(payload) {
                Ok(event) => Some(self.message_handler.handle(&event).await),
                Err(e) => {
                    warn!(error = %e, "Dropping malformed message event");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Handle a `reaction_added` event body. Returns `None` if it could not be parsed.
    pub async fn handle_reaction_json(&self, payload: &Value) -> Option<ReactionOutcome> {
        let correlation_id = Uuid::new_v4().to_string();
        let span = info_span!("reaction_event", correlation_id = %correlation_id);

        async {
            match parse_reaction_event(payload) {
                Ok(event) => Some(self.reaction_handler.handle(&event).await),
                Err(e) => {
                    warn!(error = %e, "Dropping malformed reaction event");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }
}
