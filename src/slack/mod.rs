//! All Slack-specific functionality

pub mod client;
pub mod event_parser;
pub mod listener;
pub mod mentions;
pub mod platform;
pub mod response_builder;

// Re-export main types for convenience
pub use client::SlackClient;
pub use listener::run_socket_mode;
pub use platform::ChatPlatform;
