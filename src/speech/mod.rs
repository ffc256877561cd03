//! Optional vocalization of assistant replies.

pub mod voice;

pub use voice::{Speaker, VoiceConfig, MAX_PITCH};
