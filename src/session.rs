//! The chat session: transcript, LLM client, and speaker, with an explicit
//! lifecycle. Constructed once at startup (re-hydrating persisted history),
//! dropped at shutdown.

use crate::config::AppConfig;
use crate::llm::GeminiClient;
use crate::speech::Speaker;
use crate::transcript::{persistence, TranscriptStore, Turn};
use crate::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct ChatSession {
    transcript: TranscriptStore,
    client: GeminiClient,
    speaker: Speaker,
    history_path: PathBuf,
}

impl ChatSession {
    /// Open a session, loading any persisted history. A missing or malformed
    /// history file starts the session empty.
    pub fn open(config: &AppConfig) -> Self {
        let transcript = TranscriptStore::new();
        let restored = persistence::load(&config.history_path);
        if !restored.is_empty() {
            info!(turns = restored.len(), "restored persisted transcript");
        }
        transcript.replace(restored);

        Self {
            transcript,
            client: GeminiClient::new(config.llm.clone()),
            speaker: Speaker::new(config.voice.clone()),
            history_path: config.history_path.clone(),
        }
    }

    /// One user action: append the user turn, call the API with the full
    /// history, append the reply, persist, and optionally vocalize.
    ///
    /// On API failure the user turn stays appended (last-known-good state;
    /// retrying simply sends again) and nothing is persisted. Speech failure
    /// is non-fatal: the reply is already appended and persisted, so it is
    /// logged and the reply still returned.
    pub async fn send(&self, text: &str, speak: bool) -> Result<String> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, chars = text.len(), "user turn received");

        self.transcript.append(Turn::user(text));

        let reply = match self.client.generate(&self.transcript.snapshot()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(%request_id, error = %e, "chat request failed, keeping pending user turn");
                return Err(e);
            }
        };

        self.transcript.append(Turn::assistant(&reply));
        persistence::persist(&self.history_path, &self.transcript.snapshot())?;

        if speak {
            if let Err(e) = self.speaker.speak(&reply).await {
                warn!(%request_id, error = %e, "speech playback failed");
            }
        }

        info!(%request_id, turns = self.transcript.len(), "assistant turn appended");
        Ok(reply)
    }

    /// Clear the transcript and persist the empty sequence.
    pub fn reset(&self) -> Result<()> {
        self.transcript.reset();
        persistence::persist(&self.history_path, &self.transcript.snapshot())?;
        info!("transcript reset");
        Ok(())
    }

    /// Snapshot of the transcript for rendering.
    pub fn history(&self) -> Vec<Turn> {
        self.transcript.snapshot()
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub fn voice_enabled(&self) -> bool {
        self.speaker.is_enabled()
    }
}
