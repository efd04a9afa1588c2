//! Audio sinks
//!
//! Where synthesized chunks go: the default output device, or a WAV file
//! that grows by one chunk at a time.

use async_trait::async_trait;
use bytes::Bytes;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("audio playback failed: {0}")]
    Playback(String),
    #[error("invalid WAV data: {0}")]
    Wav(#[from] hound::Error),
    #[error("failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("chunk format {found:?} does not match file format {expected:?}")]
    FormatMismatch {
        expected: hound::WavSpec,
        found: hound::WavSpec,
    },
}

/// Destination for synthesized audio, fed one chunk at a time
#[async_trait]
pub trait AudioSink: Send {
    /// Consume one chunk's WAV document. Returns once the chunk is fully
    /// handled (played, or written).
    async fn write_chunk(&mut self, audio: Bytes) -> Result<(), SinkError>;

    /// Flush whatever was written so far. Called on success and on abort.
    async fn finish(&mut self) -> Result<(), SinkError>;
}

// ============================================================================
// PlaybackSink
// ============================================================================

/// Plays each chunk on the default output device
#[derive(Debug, Default)]
pub struct PlaybackSink;

impl PlaybackSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioSink for PlaybackSink {
    async fn write_chunk(&mut self, audio: Bytes) -> Result<(), SinkError> {
        tokio::task::spawn_blocking(move || play_wav(audio))
            .await
            .map_err(|e| SinkError::Playback(format!("playback task failed: {}", e)))?
    }

    async fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Blocks until `audio` has been played
fn play_wav(audio: Bytes) -> Result<(), SinkError> {
    let (_stream, handle) = rodio::OutputStream::try_default()
        .map_err(|e| SinkError::Playback(format!("no output device: {}", e)))?;
    let sink = rodio::Sink::try_new(&handle).map_err(|e| SinkError::Playback(e.to_string()))?;
    let source =
        rodio::Decoder::new(Cursor::new(audio)).map_err(|e| SinkError::Playback(e.to_string()))?;

    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

// ============================================================================
// WavFileSink
// ============================================================================

/// Appends every chunk to a single WAV file
///
/// The file is created on the first chunk, using that chunk's format.
pub struct WavFileSink {
    path: PathBuf,
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    chunks_written: usize,
}

impl WavFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            chunks_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn chunks_written(&self) -> usize {
        self.chunks_written
    }

    fn append(&mut self, audio: &[u8]) -> Result<(), SinkError> {
        let mut reader = hound::WavReader::new(Cursor::new(audio))?;
        let spec = reader.spec();

        match self.writer.as_mut() {
            Some(writer) => {
                if writer.spec() != spec {
                    return Err(SinkError::FormatMismatch {
                        expected: writer.spec(),
                        found: spec,
                    });
                }
                copy_samples(&mut reader, writer)?;
            }
            None => {
                tracing::info!("Creating audio file {:?}", self.path);
                let mut writer =
                    hound::WavWriter::create(&self.path, spec).map_err(|source| {
                        SinkError::Create {
                            path: self.path.clone(),
                            source,
                        }
                    })?;
                copy_samples(&mut reader, &mut writer)?;
                self.writer = Some(writer);
            }
        }

        self.chunks_written += 1;
        Ok(())
    }
}

fn copy_samples<R, W>(
    reader: &mut hound::WavReader<R>,
    writer: &mut hound::WavWriter<W>,
) -> Result<(), SinkError>
where
    R: std::io::Read,
    W: std::io::Write + std::io::Seek,
{
    match reader.spec().sample_format {
        hound::SampleFormat::Int => {
            for sample in reader.samples::<i32>() {
                writer.write_sample(sample?)?;
            }
        }
        hound::SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                writer.write_sample(sample?)?;
            }
        }
    }
    Ok(())
}

#[async_trait]
impl AudioSink for WavFileSink {
    async fn write_chunk(&mut self, audio: Bytes) -> Result<(), SinkError> {
        self.append(&audio)
    }

    async fn finish(&mut self) -> Result<(), SinkError> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
            tracing::debug!(
                "Finalized {:?} with {} chunk(s)",
                self.path,
                self.chunks_written
            );
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn wav_bytes(samples: &[i16], sample_rate: u32) -> Bytes {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut buf = Vec::new();
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut buf), spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        Bytes::from(buf)
    }

    fn read_samples(path: &Path) -> (hound::WavSpec, Vec<i16>) {
        let mut reader = hound::WavReader::open(path).unwrap();
        let spec = reader.spec();
        let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        (spec, samples)
    }

    #[tokio::test]
    async fn test_chunks_are_concatenated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let mut sink = WavFileSink::new(&path);

        sink.write_chunk(wav_bytes(&[1, 2, 3], 24_000)).await.unwrap();
        sink.write_chunk(wav_bytes(&[-4, 5], 24_000)).await.unwrap();
        sink.finish().await.unwrap();

        let (spec, samples) = read_samples(&path);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(samples, vec![1, 2, 3, -4, 5]);
        assert_eq!(sink.chunks_written(), 2);
    }

    #[tokio::test]
    async fn test_no_chunks_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let mut sink = WavFileSink::new(&path);

        sink.finish().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_format_mismatch_keeps_written_audio() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let mut sink = WavFileSink::new(&path);

        sink.write_chunk(wav_bytes(&[7, 8], 24_000)).await.unwrap();
        let err = sink
            .write_chunk(wav_bytes(&[9], 16_000))
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::FormatMismatch { .. }));
        sink.finish().await.unwrap();

        let (_, samples) = read_samples(&path);
        assert_eq!(samples, vec![7, 8]);
    }

    #[tokio::test]
    async fn test_unwritable_path_is_a_create_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        let mut sink = WavFileSink::new(&path);

        let err = sink
            .write_chunk(wav_bytes(&[1], 24_000))
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::Create { ref path, .. } if path.ends_with("out.wav")));
        assert!(!err.to_string().contains("invalid WAV data"));
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut sink = WavFileSink::new(dir.path().join("out.wav"));

        let err = sink
            .write_chunk(Bytes::from_static(b"not a wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::Wav(_)));
    }
}
