//! Credentials storage
//!
//! Loads the provider key and region. Every failure here is fatal for the
//! application, so each case gets its own message.

use crate::storage::get_data_dir;
use crate::types::config::Credentials;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CREDENTIALS_FILE: &str = "setting.json";

const REQUIRED_KEYS: [&str; 2] = ["azure_key", "azure_region"];

/// Credential loading errors
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("setting.jsonファイルが見つかりません。 ({})", .0.display())]
    NotFound(PathBuf),
    #[error("setting.jsonファイルの形式が正しくありません。 ({0})")]
    Malformed(String),
    #[error("setting.jsonファイルに必要な設定 '{0}' がありません。")]
    MissingKey(&'static str),
    #[error("setting.jsonファイルを読み込めません: {0}")]
    Unreadable(String),
}

/// Path of the credentials file
pub fn get_credentials_path() -> Result<PathBuf, CredentialsError> {
    get_data_dir()
        .map(|dir| dir.join(CREDENTIALS_FILE))
        .map_err(|e| CredentialsError::Unreadable(e.to_string()))
}

/// Load credentials from the default location
pub fn load_credentials() -> Result<Credentials, CredentialsError> {
    load_credentials_from(&get_credentials_path()?)
}

/// Load credentials from `path`
pub fn load_credentials_from(path: &Path) -> Result<Credentials, CredentialsError> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CredentialsError::NotFound(path.to_path_buf()),
        _ => CredentialsError::Unreadable(e.to_string()),
    })?;

    let document: Value =
        serde_json::from_str(&json).map_err(|e| CredentialsError::Malformed(e.to_string()))?;
    let object = document
        .as_object()
        .ok_or_else(|| CredentialsError::Malformed("expected a JSON object".to_string()))?;

    for key in REQUIRED_KEYS {
        match object.get(key) {
            None | Some(Value::Null) => return Err(CredentialsError::MissingKey(key)),
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(CredentialsError::Malformed(format!("'{}' must be a string", key)))
            }
        }
    }

    let credentials: Credentials = serde_json::from_value(document)
        .map_err(|e| CredentialsError::Malformed(e.to_string()))?;

    tracing::info!(region = %credentials.azure_region, "Loaded speech credentials");
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CREDENTIALS_FILE);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_credentials() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"azure_key": "abc123", "azure_region": "japaneast"}"#);

        let creds = load_credentials_from(&path).unwrap();
        assert_eq!(creds.azure_key, "abc123");
        assert_eq!(creds.azure_region, "japaneast");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CREDENTIALS_FILE);

        let err = load_credentials_from(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::NotFound(p) if p == path));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "{ azure_key: ");

        let err = load_credentials_from(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::Malformed(_)));
    }

    #[test]
    fn test_non_object_document() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"["azure_key", "azure_region"]"#);

        let err = load_credentials_from(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::Malformed(_)));
    }

    #[test]
    fn test_missing_key_is_named() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"azure_key": "abc123"}"#);

        let err = load_credentials_from(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingKey("azure_region")));
        assert!(err.to_string().contains("azure_region"));

        let path = write(&dir, r#"{"azure_region": "japaneast"}"#);
        let err = load_credentials_from(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingKey("azure_key")));
    }

    #[test]
    fn test_errors_have_distinct_messages() {
        let messages = [
            CredentialsError::NotFound(PathBuf::from(CREDENTIALS_FILE)).to_string(),
            CredentialsError::Malformed("x".to_string()).to_string(),
            CredentialsError::MissingKey("azure_key").to_string(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
