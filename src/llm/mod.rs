//! Client for the hosted chat-completion API.

pub mod client;
pub mod config;
pub mod persona;

pub use client::GeminiClient;
pub use config::LlmConfig;
pub use persona::DEFAULT_PERSONA;
