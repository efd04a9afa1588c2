//! Azure Speech REST client
//!
//! Sends one SSML request per chunk to the regional text-to-speech endpoint
//! and returns the WAV body.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::speech::provider::{ProviderError, SpeechProvider};
use crate::types::config::Credentials;
use crate::types::voice::voice_locale;

// ============================================================================
// Azure configuration
// ============================================================================

/// Output format requested from the service (WAV container, PCM samples)
pub const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

const SYNTHESIS_PATH: &str = "/cognitiveservices/v1";

const USER_AGENT: &str = concat!("yomiage/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Regional endpoint base for `region`
pub fn region_endpoint(region: &str) -> String {
    format!("https://{}.tts.speech.microsoft.com", region.trim())
}

// ============================================================================
// AzureSpeechClient
// ============================================================================

pub struct AzureSpeechClient {
    client: reqwest::Client,
    key: String,
    endpoint: String,
}

impl AzureSpeechClient {
    pub fn new(credentials: &Credentials) -> Result<Self, ProviderError> {
        Self::with_endpoint(credentials, region_endpoint(&credentials.azure_region))
    }

    /// Client talking to `endpoint` instead of the regional host
    pub fn with_endpoint(
        credentials: &Credentials,
        endpoint: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            key: credentials.azure_key.clone(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.endpoint, SYNTHESIS_PATH)
    }
}

#[async_trait]
impl SpeechProvider for AzureSpeechClient {
    fn name(&self) -> &str {
        "azure"
    }

    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes, ProviderError> {
        tracing::debug!(voice, chars = text.chars().count(), "Requesting synthesis");

        let response = self
            .client
            .post(self.url())
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", USER_AGENT)
            .body(build_ssml(text, voice))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            };
            tracing::warn!(status = status.as_u16(), %reason, "Synthesis request rejected");
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(ProviderError::EmptyAudio);
        }
        Ok(audio)
    }
}

// ============================================================================
// SSML
// ============================================================================

/// Minimal SSML document speaking `text` with `voice`
pub fn build_ssml(text: &str, voice: &str) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{lang}'><voice name='{voice}'>{text}</voice></speak>",
        lang = escape_xml(voice_locale(voice)),
        voice = escape_xml(voice),
        text = escape_xml(text),
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
