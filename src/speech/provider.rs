//! Speech provider seam
//!
//! The provider turns one chunk of text plus a voice into audio. It is
//! injected so tests can swap in a fake.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request rejected ({status}): {reason}")]
    Rejected { status: u16, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned no audio")]
    EmptyAudio,
}

impl ProviderError {
    /// Short failure reason shown to the user
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Network(e.to_string())
    }
}

/// Speech synthesis provider trait
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Synthesize `text` with `voice`, returning a complete WAV document.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes, ProviderError>;
}
