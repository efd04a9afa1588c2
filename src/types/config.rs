//! Configuration types
//!
//! Provider credentials read from the settings file at startup.

use serde::Deserialize;
use std::fmt;

/// Azure Speech credentials
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Subscription key (secret)
    pub azure_key: String,
    /// Region code, e.g. "japaneast"
    pub azure_region: String,
}

impl Credentials {
    pub fn new(azure_key: impl Into<String>, azure_region: impl Into<String>) -> Self {
        Self {
            azure_key: azure_key.into(),
            azure_region: azure_region.into(),
        }
    }
}

// Never print the key, not even in debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("azure_key", &"<redacted>")
            .field("azure_region", &self.azure_region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("super-secret", "japaneast");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("japaneast"));
    }

    #[test]
    fn test_deserialize_ignores_extra_keys() {
        let json = r#"{"azure_key": "k", "azure_region": "westus", "comment": "x"}"#;
        let creds: Credentials = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(creds, Credentials::new("k", "westus"));
    }
}
