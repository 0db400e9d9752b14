#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use coffee_bot::core::clock::FixedClock;
use coffee_bot::core::config::AppConfig;
use coffee_bot::core::models::FetchedMessage;
use coffee_bot::errors::BotError;
use coffee_bot::slack::ChatPlatform;

pub const COFFEE_CHANNEL: &str = "C08QRCC3QTS";
pub const ANNOUNCEMENT_CHANNEL: &str = "C0ANNOUNCE";

/// One outbound platform operation, as observed by `RecordingPlatform`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DirectMessage {
        user_id: String,
        text: String,
    },
    Post {
        channel_id: String,
        thread_ts: Option<String>,
        text: String,
    },
    Delete {
        channel_id: String,
        ts: String,
    },
    Fetch {
        channel_id: String,
        ts: String,
    },
}

/// In-memory `ChatPlatform` that records every call.
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<Call>>,
    messages: HashMap<(String, String), FetchedMessage>,
    fail_sends: bool,
    fail_direct_messages: bool,
    fail_fetches: bool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send, post and delete returns an API error.
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Direct messages fail; posts and deletes succeed.
    pub fn failing_direct_messages() -> Self {
        Self {
            fail_direct_messages: true,
            ..Self::default()
        }
    }

    pub fn failing_fetches(mut self) -> Self {
        self.fail_fetches = true;
        self
    }

    pub fn with_message(mut self, channel_id: &str, message: FetchedMessage) -> Self {
        self.messages
            .insert((channel_id.to_string(), message.ts.clone()), message);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than history fetches.
    pub fn outbound_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Fetch { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn send_result(&self) -> Result<(), BotError> {
        if self.fail_sends {
            Err(BotError::ApiError("channel_not_found".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn send_direct_message(&self, user_id: &str, text: &str) -> Result<(), BotError> {
        self.record(Call::DirectMessage {
            user_id: user_id.to_string(),
            text: text.to_string(),
        });
        if self.fail_direct_messages {
            return Err(BotError::ApiError("cannot_dm_bot".to_string()));
        }
        self.send_result()
    }

    async fn post_message(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<(), BotError> {
        self.record(Call::Post {
            channel_id: channel_id.to_string(),
            thread_ts: thread_ts.map(ToString::to_string),
            text: text.to_string(),
        });
        self.send_result()
    }

    async fn delete_message(&self, channel_id: &str, ts: &str) -> Result<(), BotError> {
        self.record(Call::Delete {
            channel_id: channel_id.to_string(),
            ts: ts.to_string(),
        });
        self.send_result()
    }

    async fn fetch_message(
        &self,
        channel_id: &str,
        ts: &str,
    ) -> Result<Option<FetchedMessage>, BotError> {
        self.record(Call::Fetch {
            channel_id: channel_id.to_string(),
            ts: ts.to_string(),
        });
        if self.fail_fetches {
            return Err(BotError::ApiError("ratelimited".to_string()));
        }
        Ok(self
            .messages
            .get(&(channel_id.to_string(), ts.to_string()))
            .cloned())
    }
}

/// Configuration as the bot would load it with only the required variables set.
pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, &str> = [
        ("SLACK_BOT_TOKEN", "xoxb-test"),
        ("SLACK_APP_TOKEN", "xapp-test"),
        ("SLACK_COFFEE_CHANNEL", COFFEE_CHANNEL),
        ("SLACK_ANNOUNCEMENT_CHANNEL", ANNOUNCEMENT_CHANNEL),
    ]
    .into_iter()
    .collect();

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap()
}

/// An instant at `hour`:30 Pacific time on a winter weekday.
pub fn pacific_at(hour: u32) -> DateTime<Utc> {
    chrono_tz::US::Pacific
        .with_ymd_and_hms(2025, 1, 15, hour, 30, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn clock_at(hour: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock(pacific_at(hour)))
}
