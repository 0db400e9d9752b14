use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to serve HTTP: {0}")]
    HttpError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl From<SlackClientError> for BotError {
    fn from(error: SlackClientError) -> Self {
        BotError::ApiError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}

impl From<std::io::Error> for BotError {
    fn from(error: std::io::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::GeneralError(error.to_string())
    }
}
