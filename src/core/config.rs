use std::env;
use std::time::Duration;

use chrono_tz::Tz;

use super::hours::OrderingHours;
use crate::errors::BotError;

pub const DEFAULT_TIMEZONE: &str = "US/Pacific";
pub const DEFAULT_TIMEZONE_LABEL: &str = "PST";
pub const DEFAULT_ORDER_KEYWORDS: [&str; 5] = ["coffee", "order", "latte", "espresso", "cappuccino"];
pub const DEFAULT_ANNOUNCEMENT_TEXT: &str = "☕ Station #2 is now serving drinks!";
pub const DEFAULT_ANNOUNCEMENT_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_app_token: String,
    /// Channel where orders may only be posted during serving hours.
    pub coffee_channel_id: String,
    pub announcement_channel_id: String,
    pub ordering_hours: OrderingHours,
    /// Zone name shown to users next to the serving hours.
    pub timezone_label: String,
    /// Lowercase substrings that mark a free-text message as an order.
    pub order_keywords: Vec<String>,
    pub delete_blocked_workflow_posts: bool,
    pub announcement_text: String,
    pub announcement_interval: Duration,
    pub port: u16,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` if a required key is missing or a value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BotError::ConfigError(format!("{key}: not set")))
        };

        let timezone_name = lookup("ORDERING_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|e| BotError::ConfigError(format!("ORDERING_TIMEZONE: {e}")))?;

        let order_keywords = match lookup("ORDER_KEYWORDS") {
            Some(raw) => parse_keywords(&raw),
            None => DEFAULT_ORDER_KEYWORDS.iter().map(ToString::to_string).collect(),
        };

        let delete_blocked_workflow_posts = match lookup("DELETE_BLOCKED_WORKFLOW_POSTS") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| BotError::ConfigError(format!("DELETE_BLOCKED_WORKFLOW_POSTS: invalid boolean '{raw}'")))?,
            None => false,
        };

        let interval_secs = match lookup("ANNOUNCEMENT_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| BotError::ConfigError(format!("ANNOUNCEMENT_INTERVAL_SECS: {e}")))?,
            None => DEFAULT_ANNOUNCEMENT_INTERVAL_SECS,
        };
        if interval_secs == 0 {
            return Err(BotError::ConfigError(
                "ANNOUNCEMENT_INTERVAL_SECS: must be greater than zero".to_string(),
            ));
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| BotError::ConfigError(format!("PORT: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            slack_bot_token: required("SLACK_BOT_TOKEN")?,
            slack_app_token: required("SLACK_APP_TOKEN")?,
            coffee_channel_id: required("SLACK_COFFEE_CHANNEL")?,
            announcement_channel_id: required("SLACK_ANNOUNCEMENT_CHANNEL")?,
            ordering_hours: OrderingHours::new(timezone),
            timezone_label: lookup("ORDERING_TIMEZONE_LABEL")
                .unwrap_or_else(|| DEFAULT_TIMEZONE_LABEL.to_string()),
            order_keywords,
            delete_blocked_workflow_posts,
            announcement_text: lookup("ANNOUNCEMENT_TEXT")
                .unwrap_or_else(|| DEFAULT_ANNOUNCEMENT_TEXT.to_string()),
            announcement_interval: Duration::from_secs(interval_secs),
            port,
        })
    }
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
