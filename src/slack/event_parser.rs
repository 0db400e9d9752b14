use serde::Deserialize;
use serde_json::Value;

use crate::core::models::{InboundMessageEvent, ReactionEvent};
use crate::errors::BotError;

/// Parses the JSON body of a `message` event.
///
/// Unknown fields are ignored and every field except `channel` is optional,
/// so partially populated events still parse.
///
/// # Examples
///
/// ```
/// use coffee_bot::slack::event_parser::parse_message_event;
///
/// let event = parse_message_event(&serde_json::json!({
///     "type": "message",
///     "channel": "C123",
///     "user": "U123",
///     "text": "Two Lattes please",
///     "ts": "1721609600.000100"
/// }))
/// .unwrap();
///
/// assert_eq!(event.user_id.as_deref(), Some("U123"));
/// assert_eq!(event.text_lowercase(), "two lattes please");
/// ```
///
/// # Errors
///
/// Returns `BotError::ParseError` if the payload has no channel or a field has
/// the wrong JSON type.
pub fn parse_message_event(payload: &Value) -> Result<InboundMessageEvent, BotError> {
    InboundMessageEvent::deserialize(payload)
        .map_err(|e| BotError::ParseError(format!("message event: {e}")))
}

/// Parses the JSON body of a `reaction_added` event.
///
/// # Errors
///
/// Returns `BotError::ParseError` if the payload has no reaction name or a
/// field has the wrong JSON type.
pub fn parse_reaction_event(payload: &Value) -> Result<ReactionEvent, BotError> {
    ReactionEvent::deserialize(payload)
        .map_err(|e| BotError::ParseError(format!("reaction_added event: {e}")))
}
