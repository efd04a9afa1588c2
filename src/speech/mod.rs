//! Speech synthesis
//!
//! Text splitting, the provider seam, audio sinks and the chunk driver.

pub mod azure;
pub mod driver;
pub mod provider;
pub mod sink;
pub mod splitter;

pub use azure::AzureSpeechClient;
pub use driver::{run_synthesis, SynthesisError, SynthesisEvent, SynthesisOutcome};
pub use provider::{ProviderError, SpeechProvider};
pub use sink::{AudioSink, PlaybackSink, SinkError, WavFileSink};
pub use splitter::split_text;
