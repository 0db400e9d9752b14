//! Scripted texts the bot sends.
//!
//! Every user-facing string lives here so the handlers only decide *whether*
//! and *where* to send.

use crate::core::hours::OrderingHours;

/// Text of the keepalive route.
pub const KEEPALIVE_TEXT: &str = "☕ Coffee bot is alive.";

/// Direct message for a workflow order submitted outside serving hours.
///
/// # Examples
///
/// ```
/// use coffee_bot::core::hours::OrderingHours;
/// use coffee_bot::slack::response_builder::workflow_deflection_text;
///
/// let text = workflow_deflection_text(&OrderingHours::default(), "PST");
/// assert!(text.contains("*8–10am* and *12–2pm* PST"));
/// ```
#[must_use]
pub fn workflow_deflection_text(hours: &OrderingHours, zone_label: &str) -> String {
    format!(
        "☕ You submitted a coffee order outside of {} {zone_label}. Please try again during those hours!",
        hours.describe()
    )
}

/// Direct message for a typed order, or any post in the coffee channel,
/// outside serving hours.
#[must_use]
pub fn manual_deflection_text(hours: &OrderingHours, zone_label: &str) -> String {
    format!(
        "☕ Coffee orders are only accepted between {} {zone_label}. Please try again later!",
        hours.describe()
    )
}

/// Direct message telling the owner their drink is waiting.
#[must_use]
pub fn drink_ready_dm_text(station: usize) -> String {
    format!("🥳 Your drink is ready at station #{station}! Enjoy! ☕")
}

/// Thread reply used when nobody can be identified as the drink's owner.
#[must_use]
pub fn drink_ready_thread_text(station: usize) -> String {
    format!("🥳 This drink is ready at station #{station}! ☕")
}
