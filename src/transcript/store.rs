use super::types::Turn;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory transcript: an ordered, append-only list of turns.
///
/// Order is conversational order; turns are never reordered or edited after
/// append. The whole sequence may be replaced at load time or cleared on
/// reset.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    turns: Arc<RwLock<Vec<Turn>>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self {
            turns: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn append(&self, turn: Turn) {
        self.turns.write().push(turn);
    }

    /// Replace the whole sequence, used when re-hydrating from storage.
    pub fn replace(&self, turns: Vec<Turn>) {
        *self.turns.write() = turns;
    }

    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.read().clone()
    }

    pub fn reset(&self) {
        self.turns.write().clear();
    }

    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}
