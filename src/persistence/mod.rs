//! Save/load persistence
//!
//! Features:
//! - Plain JSON documents via serde
//! - Atomic replace (write tmp, then rename over the target)
//! - Typed errors so callers decide whether to recover or surface

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for load/save operations
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read and deserialize a JSON document
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path)?;
    let value = serde_json::from_str(&text)?;
    Ok(value)
}

/// Serialize and atomically write a JSON document
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string(value)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

/// Sibling path used while a save is in flight
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
