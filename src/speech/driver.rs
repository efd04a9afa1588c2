//! Synthesis driver
//!
//! Feeds the chunks of a text to the provider strictly one at a time and
//! hands each result to a sink. The first failure aborts the run; audio
//! already played or written stays.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::speech::provider::{ProviderError, SpeechProvider};
use crate::speech::sink::{AudioSink, SinkError};
use crate::speech::splitter::split_text;

/// Progress reported while a run is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEvent {
    /// Emitted before the first request; `total` is the chunk count
    Started { total: usize },
    /// Emitted after each chunk completes
    Progress { completed: usize, total: usize },
    Finished { total: usize },
    Failed { chunk_index: usize, reason: String },
    Cancelled { completed: usize },
}

/// How a run that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Completed { chunks: usize },
    Cancelled { completed: usize },
}

/// Synthesis errors
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("{source}")]
    Provider {
        chunk_index: usize,
        #[source]
        source: ProviderError,
    },
    #[error("{source}")]
    Sink {
        chunk_index: usize,
        #[source]
        source: SinkError,
    },
}

impl SynthesisError {
    /// Zero-based index of the chunk that failed
    pub fn chunk_index(&self) -> usize {
        match self {
            SynthesisError::Provider { chunk_index, .. }
            | SynthesisError::Sink { chunk_index, .. } => *chunk_index,
        }
    }
}

/// Split `text` and synthesize every chunk with `voice` into `sink`.
///
/// `stop` is checked before each request; once set, the run ends after the
/// chunk in flight.
pub async fn run_synthesis<S>(
    provider: &dyn SpeechProvider,
    text: &str,
    voice: &str,
    sink: &mut S,
    stop: &AtomicBool,
    mut on_event: impl FnMut(SynthesisEvent),
) -> Result<SynthesisOutcome, SynthesisError>
where
    S: AudioSink + ?Sized,
{
    let chunks = split_text(text);
    let total = chunks.len();

    tracing::info!(provider = provider.name(), voice, total, "Starting synthesis");
    on_event(SynthesisEvent::Started { total });

    for (index, chunk) in chunks.iter().enumerate() {
        if stop.load(Ordering::Relaxed) {
            tracing::info!("Synthesis stopped by user after {} chunk(s)", index);
            finish_sink(sink).await;
            on_event(SynthesisEvent::Cancelled { completed: index });
            return Ok(SynthesisOutcome::Cancelled { completed: index });
        }

        let result = match provider.synthesize(chunk, voice).await {
            Ok(audio) => sink
                .write_chunk(audio)
                .await
                .map_err(|source| SynthesisError::Sink {
                    chunk_index: index,
                    source,
                }),
            Err(source) => Err(SynthesisError::Provider {
                chunk_index: index,
                source,
            }),
        };

        if let Err(e) = result {
            tracing::error!("Synthesis failed on chunk {}/{}: {}", index + 1, total, e);
            finish_sink(sink).await;
            on_event(SynthesisEvent::Failed {
                chunk_index: index,
                reason: e.to_string(),
            });
            return Err(e);
        }

        on_event(SynthesisEvent::Progress {
            completed: index + 1,
            total,
        });
    }

    if let Err(e) = sink.finish().await {
        tracing::error!("Failed to finish audio output: {}", e);
        let chunk_index = total.saturating_sub(1);
        on_event(SynthesisEvent::Failed {
            chunk_index,
            reason: e.to_string(),
        });
        return Err(SynthesisError::Sink {
            chunk_index,
            source: e,
        });
    }

    tracing::info!("Synthesis finished ({} chunk(s))", total);
    on_event(SynthesisEvent::Finished { total });
    Ok(SynthesisOutcome::Completed { chunks: total })
}

async fn finish_sink<S: AudioSink + ?Sized>(sink: &mut S) {
    if let Err(e) = sink.finish().await {
        tracing::warn!("Failed to flush partial audio output: {}", e);
    }
}

/// Run a synthesis on a worker task, streaming its events.
///
/// The receiver yields every event of the run and closes after the final
/// `Finished`, `Failed` or `Cancelled`.
pub fn spawn_synthesis(
    provider: Arc<dyn SpeechProvider>,
    text: String,
    voice: String,
    mut sink: Box<dyn AudioSink>,
    stop: Arc<AtomicBool>,
) -> mpsc::UnboundedReceiver<SynthesisEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let _ = run_synthesis(
            provider.as_ref(),
            &text,
            &voice,
            sink.as_mut(),
            &stop,
            |event| {
                // The UI may have gone away; nothing to do then.
                let _ = tx.send(event);
            },
        )
        .await;
    });

    rx
}
