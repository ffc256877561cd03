pub mod config;
pub mod llm;
pub mod session;
pub mod speech;
pub mod transcript;
pub mod web;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ValetError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Chat API error: {0}")]
    ApiError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Speech error: {0}")]
    SpeechError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<std::io::Error> for ValetError {
    fn from(e: std::io::Error) -> Self {
        ValetError::StorageError(e.to_string())
    }
}

impl ValetError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Requires fixing the environment and restarting
            ValetError::ConfigError(_) => false,
            // Typically transient: the remote call can simply be retried
            ValetError::ApiError(_) => true,
            ValetError::StorageError(_) => false,
            // The reply is still shown as text
            ValetError::SpeechError(_) => true,
            ValetError::ServerError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ValetError::ConfigError(_) => {
                "Configuration error. Please check the server settings.".to_string()
            }
            ValetError::ApiError(_) => {
                "The assistant could not be reached. Please try again.".to_string()
            }
            ValetError::StorageError(_) => {
                "Failed to save the conversation history.".to_string()
            }
            ValetError::SpeechError(_) => {
                "Speech playback failed. The reply is shown as text.".to_string()
            }
            ValetError::ServerError(_) => "Server error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValetError>;
