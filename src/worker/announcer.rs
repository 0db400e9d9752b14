//! Periodic station announcements.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::stop_requested;
use crate::core::config::AppConfig;
use crate::slack::platform::ChatPlatform;

/// Posts a fixed announcement to a channel on a fixed interval.
pub struct Announcer {
    platform: Arc<dyn ChatPlatform>,
    channel_id: String,
    text: String,
    interval: Duration,
}

impl Announcer {
    #[must_use]
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        channel_id: String,
        text: String,
        interval: Duration,
    ) -> Self {
        Self {
            platform,
            channel_id,
            text,
            interval,
        }
    }

    #[must_use]
    pub fn from_config(platform: Arc<dyn ChatPlatform>, config: &AppConfig) -> Self {
        Self::new(
            platform,
            config.announcement_channel_id.clone(),
            config.announcement_text.clone(),
            config.announcement_interval,
        )
    }

    /// Post the announcement once. Failures are logged, never returned.
    pub async fn announce(&self) -> bool {
        info!(channel_id = %self.channel_id, "Sending station update");
        match self.platform.post_message(&self.channel_id, None, &self.text).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    operation = "post_message",
                    channel_id = %self.channel_id,
                    error = %e,
                    "Failed to send station update"
                );
                false
            }
        }
    }

    /// Announce immediately, then once per interval, until `shutdown` carries
    /// `true`. Returns the number of announcements attempted.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> usize {
        if *shutdown.borrow_and_update() {
            return 0;
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts = 0;

        loop {
            tokio::select! {
                biased;
                () = stop_requested(&mut shutdown) => break,
                _ = ticker.tick() => {
                    self.announce().await;
                    attempts += 1;
                }
            }
        }

        info!(attempts, "Announcement loop stopped");
        attempts
    }
}
