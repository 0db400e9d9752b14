//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the bot makes. Calls are made once;
//! callers decide what a failure means for the event being handled.

use async_trait::async_trait;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{
    SlackApiChatDeleteRequest, SlackApiChatPostMessageRequest, SlackApiConversationsHistoryRequest,
    SlackApiConversationsOpenRequest,
};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackHistoryMessage, SlackMessageContent,
    SlackTs, SlackUserId,
};
use tracing::{debug, warn};

use super::platform::ChatPlatform;
use crate::core::models::FetchedMessage;
use crate::errors::BotError;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a BotError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

fn shared_client() -> Result<&'static SlackHyperClient, BotError> {
    SLACK_CLIENT
        .as_ref()
        .ok_or_else(|| BotError::GeneralError("Slack HTTP connector not initialized".to_string()))
}

/// Convert a history entry into a `FetchedMessage`, but only if it is the
/// message posted at `ts`. `conversations.history` with `latest` + `inclusive`
/// returns the nearest older message when the requested one is gone.
fn fetched_from_history(message: SlackHistoryMessage, ts: &str) -> Option<FetchedMessage> {
    if message.origin.ts.0 != ts {
        return None;
    }

    Some(FetchedMessage {
        ts: message.origin.ts.0,
        user_id: message.sender.user.map(|u| u.0),
        text: message.content.text,
    })
}

/// Slack Web API client authenticated with the bot token
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    #[must_use]
    pub fn token(&self) -> &SlackApiToken {
        &self.token
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn get_user_im_channel(&self, user_id: &str) -> Result<String, BotError> {
        let session = shared_client()?.open_session(&self.token);
        let open_req = SlackApiConversationsOpenRequest::new()
            .with_users(vec![SlackUserId(user_id.to_string())]);

        let result = session.conversations_open(&open_req).await?;
        Ok(result.channel.id.0)
    }

    /// # Errors
    ///
    /// Returns an error if opening the IM channel or posting fails.
    pub async fn send_dm(&self, user_id: &str, message: &str) -> Result<(), BotError> {
        let im_channel = self.get_user_im_channel(user_id).await?;
        self.post_text(&im_channel, None, message).await
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn post_text(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        message: &str,
    ) -> Result<(), BotError> {
        let session = shared_client()?.open_session(&self.token);

        let mut post_req = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackMessageContent::new().with_text(message.to_string()),
        );
        if let Some(ts) = thread_ts {
            post_req = post_req.with_thread_ts(SlackTs(ts.to_string()));
        }

        session.chat_post_message(&post_req).await?;
        debug!(channel_id, thread_ts = ?thread_ts, "Posted message");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn delete(&self, channel_id: &str, ts: &str) -> Result<(), BotError> {
        let session = shared_client()?.open_session(&self.token);

        let delete_req = SlackApiChatDeleteRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackTs(ts.to_string()),
        );

        session.chat_delete(&delete_req).await?;
        Ok(())
    }

    /// Fetch the message at `ts` using `conversations.history` bounded to one result.
    ///
    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn get_message_at(
        &self,
        channel_id: &str,
        ts: &str,
    ) -> Result<Option<FetchedMessage>, BotError> {
        let session = shared_client()?.open_session(&self.token);

        let request = SlackApiConversationsHistoryRequest::new()
            .with_channel(SlackChannelId(channel_id.to_string()))
            .with_latest(SlackTs(ts.to_string()))
            .with_inclusive(true)
            .with_limit(1);

        let result = session.conversations_history(&request).await?;

        Ok(result
            .messages
            .into_iter()
            .next()
            .and_then(|message| fetched_from_history(message, ts)))
    }
}

#[async_trait]
impl ChatPlatform for SlackClient {
    async fn send_direct_message(&self, user_id: &str, text: &str) -> Result<(), BotError> {
        self.send_dm(user_id, text).await
    }

    async fn post_message(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<(), BotError> {
        self.post_text(channel_id, thread_ts, text).await
    }

    async fn delete_message(&self, channel_id: &str, ts: &str) -> Result<(), BotError> {
        self.delete(channel_id, ts).await
    }

    async fn fetch_message(
        &self,
        channel_id: &str,
        ts: &str,
    ) -> Result<Option<FetchedMessage>, BotError> {
        self.get_message_at(channel_id, ts).await
    }
}
