use serde::Deserialize;
use serde_json::Value;

/// Subtype Slack attaches to messages posted by workflows and integrations.
pub const SUBTYPE_BOT_MESSAGE: &str = "bot_message";
/// Subtype Slack attaches to deletion notices.
pub const SUBTYPE_MESSAGE_DELETED: &str = "message_deleted";
/// Subtypes that still carry text a person wrote.
pub const TYPED_SUBTYPES: [&str; 2] = ["thread_broadcast", "file_share"];

/// A `message` event as delivered to the bot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InboundMessageEvent {
    #[serde(rename = "channel")]
    pub channel_id: String,
    #[serde(rename = "user", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Block Kit content, kept as untyped JSON trees.
    #[serde(default)]
    pub blocks: Vec<Value>,
}

impl InboundMessageEvent {
    #[must_use]
    pub fn text_lowercase(&self) -> String {
        self.text.to_lowercase()
    }

    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.subtype.as_deref() == Some(SUBTYPE_MESSAGE_DELETED)
    }

    /// Posted by an automated submission flow rather than typed by a person.
    #[must_use]
    pub fn is_workflow_submission(&self) -> bool {
        self.subtype.as_deref() == Some(SUBTYPE_BOT_MESSAGE)
    }

    /// A message someone typed, as opposed to a join, topic change, pin or
    /// other system notice.
    #[must_use]
    pub fn is_typed_by_person(&self) -> bool {
        self.subtype
            .as_deref()
            .is_none_or(|subtype| TYPED_SUBTYPES.contains(&subtype))
    }
}

/// The message a reaction was added to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReactionItem {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

/// A `reaction_added` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReactionEvent {
    pub reaction: String,
    #[serde(rename = "user", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub item: ReactionItem,
}

/// A single message read back from channel history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedMessage {
    pub ts: String,
    pub user_id: Option<String>,
    pub text: Option<String>,
}

/// Where a notification is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    DirectMessage { user_id: String },
    ThreadReply { channel_id: String, thread_ts: String },
}
