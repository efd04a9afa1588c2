//! Persistent storage
//!
//! This module handles the two JSON files the application reads: provider
//! credentials and the saved session.

pub mod credentials;
pub mod session;

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "YOMIAGE_HOME";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine the data directory")]
    NoDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directory holding `setting.json` and `work.json`
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    directories::ProjectDirs::from("com", "Yomiage", "Yomiage")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
