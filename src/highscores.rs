//! High score persistence
//!
//! A single scalar stored as `{"score": <integer>}`. Reads recover silently to
//! zero and writes are best-effort: persistence trouble never reaches the
//! player.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.json";

/// On-disk document
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub score: u64,
}

/// File-backed (or in-memory) high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    /// Last value read or written
    cached: u64,
}

impl HighScoreStore {
    /// Store backed by a JSON file
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            cached: 0,
        }
    }

    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            cached: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Most recently loaded or recorded value
    pub fn cached(&self) -> u64 {
        self.cached
    }

    /// Read the stored score, propagating failures
    pub fn try_load(&self) -> Result<u64, PersistError> {
        match &self.path {
            Some(path) => Ok(persistence::load_json::<HighScoreRecord>(path)?.score),
            None => Ok(self.cached),
        }
    }

    /// Read the stored score; absent or corrupt files count as zero
    pub fn load(&mut self) -> u64 {
        self.cached = match self.try_load() {
            Ok(score) => score,
            Err(PersistError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => 0,
            Err(err) => {
                log::warn!("High score unreadable, starting from 0: {}", err);
                0
            }
        };
        self.cached
    }

    /// Persist `score` if it beats the stored value. Returns true on a new record.
    ///
    /// The comparison is against a fresh read so a score is never written over
    /// a better one. Write failures are logged and swallowed.
    pub fn record(&mut self, score: u64) -> bool {
        let stored = self.load();
        if score <= stored {
            return false;
        }

        self.cached = score;
        if let Some(path) = &self.path {
            if let Err(err) = persistence::save_json(path, &HighScoreRecord { score }) {
                log::warn!("Could not save high score to {}: {}", path.display(), err);
                return true;
            }
        }
        log::info!("New high score: {}", score);
        true
    }
}
