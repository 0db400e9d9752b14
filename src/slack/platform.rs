//! The outbound operations the bot needs from the chat platform.

use async_trait::async_trait;

use crate::core::models::FetchedMessage;
use crate::errors::BotError;

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send `text` to `user_id` in their direct-message conversation with the bot.
    async fn send_direct_message(&self, user_id: &str, text: &str) -> Result<(), BotError>;

    /// Post `text` to a channel, as a threaded reply when `thread_ts` is given.
    async fn post_message(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<(), BotError>;

    async fn delete_message(&self, channel_id: &str, ts: &str) -> Result<(), BotError>;

    /// The message posted at exactly `ts`, if it still exists.
    async fn fetch_message(
        &self,
        channel_id: &str,
        ts: &str,
    ) -> Result<Option<FetchedMessage>, BotError>;
}
