//! Handler for `message` events.
//!
//! Outside serving hours the bot deflects coffee activity with a direct
//! message to the person responsible:
//! - workflow submissions in the coffee channel: the submitter mentioned inside the post
//! - any post in the coffee channel: its author
//! - free-text messages elsewhere that mention an order keyword: their author

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::core::clock::Clock;
use crate::core::config::AppConfig;
use crate::core::models::InboundMessageEvent;
use crate::slack::mentions::{find_mention_in_text, find_submitter_in_blocks};
use crate::slack::platform::ChatPlatform;
use crate::slack::response_builder::{manual_deflection_text, workflow_deflection_text};

/// What the handler did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Deletion and other system notices, authorless or bot-authored messages.
    Ignored,
    /// Workflow post with no recoverable submitter.
    NoSubmitter,
    /// Free text that does not look like an order.
    NotAnOrder,
    WithinHours,
    Deflected {
        user_id: String,
        delivered: bool,
        deleted: bool,
    },
}

pub struct MessageHandler {
    config: Arc<AppConfig>,
    platform: Arc<dyn ChatPlatform>,
    clock: Arc<dyn Clock>,
}

impl MessageHandler {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, platform: Arc<dyn ChatPlatform>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            platform,
            clock,
        }
    }

    fn is_open(&self) -> bool {
        self.config.ordering_hours.is_open_at(self.clock.now())
    }

    pub async fn handle(&self, event: &InboundMessageEvent) -> MessageOutcome {
        if event.is_deletion() {
            return MessageOutcome::Ignored;
        }

        // Only the coffee channel's order workflow counts; other integrations
        // fall through to the bot_id check below.
        if event.is_workflow_submission() && event.channel_id == self.config.coffee_channel_id {
            return self.handle_workflow_submission(event).await;
        }

        if !event.is_typed_by_person() {
            return MessageOutcome::Ignored;
        }

        let Some(user_id) = event.user_id.as_deref().filter(|u| !u.is_empty()) else {
            return MessageOutcome::Ignored;
        };

        // Our own deflections land in DMs; never react to bot-authored posts.
        if event.bot_id.is_some() {
            return MessageOutcome::Ignored;
        }

        if event.channel_id == self.config.coffee_channel_id {
            if self.is_open() {
                return MessageOutcome::WithinHours;
            }
            info!(user_id, channel_id = %event.channel_id, "Blocked post in coffee channel");
            return self.deflect_manual(user_id).await;
        }

        let text = event.text_lowercase();
        if !self
            .config
            .order_keywords
            .iter()
            .any(|keyword| text.contains(keyword.as_str()))
        {
            return MessageOutcome::NotAnOrder;
        }

        if self.is_open() {
            return MessageOutcome::WithinHours;
        }

        info!(user_id, channel_id = %event.channel_id, "Blocked manual request");
        self.deflect_manual(user_id).await
    }

    async fn handle_workflow_submission(&self, event: &InboundMessageEvent) -> MessageOutcome {
        info!(channel_id = %event.channel_id, "Workflow message detected");

        let Some(submitter_id) = find_submitter_in_blocks(&event.blocks)
            .or_else(|| find_mention_in_text(&event.text))
        else {
            debug!(channel_id = %event.channel_id, "No submitter found in workflow message");
            return MessageOutcome::NoSubmitter;
        };

        if self.is_open() {
            return MessageOutcome::WithinHours;
        }

        let text = workflow_deflection_text(&self.config.ordering_hours, &self.config.timezone_label);
        let delivered = self.notify(&submitter_id, &text).await;
        if delivered {
            info!(user_id = %submitter_id, "Notified submitter about blocked order");
        }

        // An undelivered explanation leaves the post in place.
        let deleted = if delivered && self.config.delete_blocked_workflow_posts {
            self.delete_original(event).await
        } else {
            false
        };

        MessageOutcome::Deflected {
            user_id: submitter_id,
            delivered,
            deleted,
        }
    }

    async fn deflect_manual(&self, user_id: &str) -> MessageOutcome {
        let text = manual_deflection_text(&self.config.ordering_hours, &self.config.timezone_label);
        let delivered = self.notify(user_id, &text).await;

        MessageOutcome::Deflected {
            user_id: user_id.to_string(),
            delivered,
            deleted: false,
        }
    }

    async fn notify(&self, user_id: &str, text: &str) -> bool {
        match self.platform.send_direct_message(user_id, text).await {
            Ok(()) => true,
            Err(e) => {
                error!(operation = "send_direct_message", user_id, error = %e, "Failed to DM user");
                false
            }
        }
    }

    async fn delete_original(&self, event: &InboundMessageEvent) -> bool {
        let Some(ts) = event.ts.as_deref() else {
            warn!(channel_id = %event.channel_id, "Workflow message has no ts; cannot delete");
            return false;
        };

        match self.platform.delete_message(&event.channel_id, ts).await {
            Ok(()) => {
                info!(channel_id = %event.channel_id, ts, "Deleted blocked workflow message");
                true
            }
            Err(e) => {
                error!(
                    operation = "delete_message",
                    channel_id = %event.channel_id,
                    ts,
                    error = %e,
                    "Failed to delete workflow message"
                );
                false
            }
        }
    }
}
