//! Session storage
//!
//! Restores and saves window geometry, last text and last voice.

use crate::storage::{get_data_dir, StorageError};
use crate::types::session::SessionState;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SESSION_FILE: &str = "work.json";

/// Get the session file path
pub fn get_session_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join(SESSION_FILE))
}

/// Load the session from the default location
///
/// Returns defaults if the file doesn't exist or is corrupted
pub fn load_session() -> SessionState {
    match get_session_path() {
        Ok(path) => load_session_from(&path),
        Err(e) => {
            tracing::warn!("Failed to locate session file, using defaults: {}", e);
            SessionState::default()
        }
    }
}

/// Load the session from `path`
///
/// A corrupt file is deleted so the next start is clean.
pub fn load_session_from(path: &Path) -> SessionState {
    match load_session_internal(path) {
        Ok(state) => state,
        Err(StorageError::Json(e)) => {
            tracing::warn!("Session file is corrupt, discarding it: {}", e);
            if let Err(e) = fs::remove_file(path) {
                tracing::warn!("Failed to remove corrupt session file: {}", e);
            }
            SessionState::default()
        }
        Err(e) => {
            tracing::warn!("Failed to load session, using defaults: {}", e);
            SessionState::default()
        }
    }
}

fn load_session_internal(path: &Path) -> Result<SessionState, StorageError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("Session file not found, using defaults");
            return Ok(SessionState::default());
        }
        Err(e) => return Err(e.into()),
    };

    // Invalid UTF-8 is reported as a JSON error, so it counts as corrupt
    let state: SessionState = serde_json::from_slice(&raw)?;

    tracing::debug!("Loaded session from disk");
    Ok(state)
}

/// Save the session to the default location
pub fn save_session(state: &SessionState) -> Result<(), StorageError> {
    save_session_to(&get_session_path()?, state)
}

/// Save the session to `path`, replacing any previous contents
pub fn save_session_to(path: &Path, state: &SessionState) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;

    tracing::debug!("Saved session to disk");
    Ok(())
}
