//! Flat-file transcript persistence.
//!
//! The on-disk format is the Gemini chat-history shape: a JSON array of
//! `{"role": "user"|"model", "parts": ["<text>"]}` objects, so an existing
//! history file from the API's own session format re-hydrates directly.
//!
//! Loading is lenient: a missing, empty, or malformed file yields an empty
//! transcript and never an error. Persisting is strict: any failure is
//! surfaced to the caller.

use super::types::{Role, Turn};
use crate::{Result, ValetError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
struct StoredTurn {
    role: StoredRole,
    parts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum StoredRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

impl From<Role> for StoredRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => StoredRole::User,
            Role::Assistant => StoredRole::Model,
        }
    }
}

impl From<StoredRole> for Role {
    fn from(role: StoredRole) -> Self {
        match role {
            StoredRole::User => Role::User,
            StoredRole::Model => Role::Assistant,
        }
    }
}

/// Load persisted turns. Missing, empty, or malformed storage yields an
/// empty sequence.
pub fn load(path: &Path) -> Vec<Turn> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history file, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "history unreadable, starting empty");
            return Vec::new();
        }
    };

    if content.trim().is_empty() {
        return Vec::new();
    }

    let stored: Vec<StoredTurn> = match serde_json::from_str(&content) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "history malformed, starting empty");
            return Vec::new();
        }
    };

    stored
        .into_iter()
        .map(|t| Turn::new(t.role.into(), t.parts.concat()))
        .collect()
}

/// Serialize the full sequence to `path`, overwriting prior contents.
pub fn persist(path: &Path, turns: &[Turn]) -> Result<()> {
    let stored: Vec<StoredTurn> = turns
        .iter()
        .map(|t| StoredTurn {
            role: t.role.into(),
            parts: vec![t.text.clone()],
        })
        .collect();

    let json = serde_json::to_string_pretty(&stored)
        .map_err(|e| ValetError::StorageError(format!("serialize history: {e}")))?;

    std::fs::write(path, json)
        .map_err(|e| ValetError::StorageError(format!("write {}: {e}", path.display())))?;

    debug!(path = %path.display(), turns = turns.len(), "history persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_preserves_order_and_roles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");

        let turns = vec![
            Turn::user("2+2?"),
            Turn::assistant("4"),
            Turn::user("and twice that?"),
            Turn::assistant("8"),
        ];
        persist(&path, &turns).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.len(), turns.len());
        for (a, b) in turns.iter().zip(loaded.iter()) {
            assert_eq!(a.role, b.role);
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn test_assistant_stored_as_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");

        persist(&path, &[Turn::assistant("Good evening.")]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"model\""));
        assert!(!raw.contains("\"assistant\""));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nope.txt")).is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");
        std::fs::write(&path, "").unwrap();
        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");

        std::fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_empty());

        // Valid JSON, wrong shape
        std::fs::write(&path, r#"[{"role": "narrator", "parts": ["hm"]}]"#).unwrap();
        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_persist_overwrites_prior_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");

        persist(&path, &[Turn::user("first"), Turn::assistant("one")]).unwrap();
        persist(&path, &[Turn::user("second")]).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "second");
    }

    #[test]
    fn test_persist_to_bad_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("history.txt");
        assert!(persist(&path, &[Turn::user("hello")]).is_err());
    }

    #[test]
    fn test_multi_part_turns_concatenate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");

        std::fs::write(
            &path,
            r#"[{"role": "model", "parts": ["Good ", "evening."]}]"#,
        )
        .unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].role, Role::Assistant);
        assert_eq!(loaded[0].text, "Good evening.");
    }
}
