//! Handler for `reaction_added` events.
//!
//! Baristas mark a drink as ready by reacting to the order with a number-word
//! emoji (`:one:` .. `:nine:`); the number is the pickup station.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::core::models::{FetchedMessage, NotificationTarget, ReactionEvent};
use crate::slack::mentions::find_mention_in_text;
use crate::slack::platform::ChatPlatform;
use crate::slack::response_builder::{drink_ready_dm_text, drink_ready_thread_text};

/// Reaction names that map to stations 1 through 9, in order.
pub const STATION_EMOJIS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// 1-based station number for a reaction name.
///
/// # Examples
///
/// ```
/// use coffee_bot::events::reaction::station_number;
///
/// assert_eq!(station_number("one"), Some(1));
/// assert_eq!(station_number("nine"), Some(9));
/// assert_eq!(station_number("tada"), None);
/// ```
#[must_use]
pub fn station_number(emoji: &str) -> Option<usize> {
    STATION_EMOJIS
        .iter()
        .position(|name| *name == emoji)
        .map(|index| index + 1)
}

/// Who should hear about a ready drink: the message author, else the first
/// user mentioned in its text, else the message's thread.
#[must_use]
pub fn resolve_target(message: &FetchedMessage, channel_id: &str) -> NotificationTarget {
    message
        .user_id
        .clone()
        .filter(|u| !u.is_empty())
        .or_else(|| message.text.as_deref().and_then(find_mention_in_text))
        .map_or_else(
            || NotificationTarget::ThreadReply {
                channel_id: channel_id.to_string(),
                thread_ts: message.ts.clone(),
            },
            |user_id| NotificationTarget::DirectMessage { user_id },
        )
}

/// What the handler did with a reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// Not a station emoji, or the event lacks an item channel/timestamp.
    Ignored,
    /// The reacted message could not be fetched.
    MessageNotFound,
    Notified {
        station: usize,
        target: NotificationTarget,
        delivered: bool,
    },
}

pub struct ReactionHandler {
    platform: Arc<dyn ChatPlatform>,
}

impl ReactionHandler {
    #[must_use]
    pub fn new(platform: Arc<dyn ChatPlatform>) -> Self {
        Self { platform }
    }

    pub async fn handle(&self, event: &ReactionEvent) -> ReactionOutcome {
        let Some(station) = station_number(&event.reaction) else {
            return ReactionOutcome::Ignored;
        };

        let (Some(channel_id), Some(ts)) = (event.item.channel.as_deref(), event.item.ts.as_deref())
        else {
            debug!(reaction = %event.reaction, "Reaction item has no channel or ts");
            return ReactionOutcome::Ignored;
        };

        let message = match self.platform.fetch_message(channel_id, ts).await {
            Ok(Some(message)) => message,
            Ok(None) => {
                debug!(channel_id, ts, "Reacted message not found");
                return ReactionOutcome::MessageNotFound;
            }
            Err(e) => {
                error!(
                    operation = "fetch_message",
                    channel_id,
                    ts,
                    error = %e,
                    "Failed to fetch reacted message"
                );
                return ReactionOutcome::MessageNotFound;
            }
        };

        let target = resolve_target(&message, channel_id);

        let result = match &target {
            NotificationTarget::DirectMessage { user_id } => self
                .platform
                .send_direct_message(user_id, &drink_ready_dm_text(station))
                .await
                .map_err(|e| ("send_direct_message", user_id.as_str(), e)),
            NotificationTarget::ThreadReply {
                channel_id,
                thread_ts,
            } => self
                .platform
                .post_message(channel_id, Some(thread_ts.as_str()), &drink_ready_thread_text(station))
                .await
                .map_err(|e| ("post_message", channel_id.as_str(), e)),
        };

        let delivered = match result {
            Ok(()) => {
                info!(station, target = ?target, "Drink ready notification sent");
                true
            }
            Err((operation, target_id, e)) => {
                error!(operation, target_id, station, error = %e, "Failed to send drink ready notification");
                false
            }
        };

        ReactionOutcome::Notified {
            station,
            target,
            delivered,
        }
    }
}
