//! Form actions
//!
//! Speak, save and stop. A run executes on a worker task; its events are
//! drained here and turned into progress and dialog updates.

use crate::app::{AppState, RunProgress};
use crate::speech::driver::spawn_synthesis;
use crate::speech::{AudioSink, PlaybackSink, SynthesisEvent, WavFileSink};
use crate::ui::components::dialog::DialogMessage;
use dioxus::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

pub const EMPTY_TEXT_WARNING: &str = "テキストを入力してください。";
pub const SAVE_DIALOG_TITLE: &str = "音声ファイルを保存";
pub const WAV_FILTER_NAME: &str = "WAVファイル";

/// What a run does with the audio
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunKind {
    Speak,
    Save,
}

impl RunKind {
    pub fn success_message(self) -> &'static str {
        match self {
            RunKind::Speak => "テキストの読み上げが完了しました。",
            RunKind::Save => "音声ファイルの保存が完了しました。",
        }
    }
}

/// User-facing text for a failed run
pub fn failure_message(reason: &str) -> String {
    format!("音声合成に失敗しました: {}", reason)
}

/// Suggested file name for a save started at `now`
pub fn default_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("speech-{}.wav", now.format("%Y%m%d-%H%M%S"))
}

/// Append `.wav` when the chosen path has no extension
pub fn with_wav_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("wav");
    }
    path
}

/// Trimmed text to synthesize, or `None` after warning the user
fn text_to_synthesize(app_state: &AppState) -> Option<String> {
    let text = app_state.session.read().text.trim().to_string();
    if text.is_empty() {
        let mut dialog = app_state.dialog;
        dialog.set(Some(DialogMessage::warning(EMPTY_TEXT_WARNING)));
        return None;
    }
    Some(text)
}

pub fn speak(app_state: AppState) {
    let Some(text) = text_to_synthesize(&app_state) else {
        return;
    };
    spawn(run(app_state, RunKind::Speak, text, Box::new(PlaybackSink::new())));
}

pub fn save(app_state: AppState) {
    let Some(text) = text_to_synthesize(&app_state) else {
        return;
    };

    spawn(async move {
        let handle = rfd::AsyncFileDialog::new()
            .set_title(SAVE_DIALOG_TITLE)
            .add_filter(WAV_FILTER_NAME, &["wav"])
            .set_file_name(default_file_name(chrono::Local::now()))
            .save_file()
            .await;

        let Some(handle) = handle else {
            tracing::debug!("Save dialog cancelled");
            return;
        };

        let path = with_wav_extension(handle.path().to_path_buf());
        run(app_state, RunKind::Save, text, Box::new(WavFileSink::new(path))).await;
    });
}

pub fn stop(app_state: &AppState) {
    tracing::info!("Stop requested");
    app_state.stop_signal.store(true, Ordering::Relaxed);
}

/// Progress and dialog updates for one run event
pub fn apply_event(
    kind: RunKind,
    event: SynthesisEvent,
) -> (Option<RunProgress>, Option<DialogMessage>) {
    match event {
        SynthesisEvent::Started { total } => (Some(RunProgress { value: 0, max: total }), None),
        SynthesisEvent::Progress { completed, total } => (
            Some(RunProgress {
                value: completed,
                max: total,
            }),
            None,
        ),
        SynthesisEvent::Finished { .. } => {
            (None, Some(DialogMessage::info(kind.success_message())))
        }
        SynthesisEvent::Failed { reason, .. } => {
            (None, Some(DialogMessage::error(failure_message(&reason))))
        }
        SynthesisEvent::Cancelled { completed } => {
            tracing::info!("{:?} run stopped after {} chunk(s)", kind, completed);
            (None, None)
        }
    }
}

/// Run a synthesis to completion, mirroring its events into the UI
async fn run(app_state: AppState, kind: RunKind, text: String, sink: Box<dyn AudioSink>) {
    let mut is_running = app_state.is_running;
    let mut progress = app_state.progress;
    let mut dialog = app_state.dialog;

    if *is_running.peek() {
        tracing::warn!("A synthesis run is already active, ignoring {:?}", kind);
        return;
    }

    let voice = app_state.session.peek().voice.clone();
    app_state.stop_signal.store(false, Ordering::Relaxed);
    is_running.set(true);
    progress.set(RunProgress::default());

    let mut events = spawn_synthesis(
        app_state.provider.clone(),
        text,
        voice,
        sink,
        app_state.stop_signal.clone(),
    );

    while let Some(event) = events.recv().await {
        let (next_progress, message) = apply_event(kind, event);
        if let Some(next_progress) = next_progress {
            progress.set(next_progress);
        }
        if let Some(message) = message {
            dialog.set(Some(message));
        }
    }

    is_running.set(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::dialog::DialogLevel;
    use chrono::TimeZone;

    /// Fold a run's events the way the form applies them
    fn replay(kind: RunKind, events: Vec<SynthesisEvent>) -> (RunProgress, Vec<DialogMessage>) {
        let mut progress = RunProgress::default();
        let mut dialogs = Vec::new();
        for event in events {
            let (next, message) = apply_event(kind, event);
            if let Some(next) = next {
                progress = next;
            }
            dialogs.extend(message);
        }
        (progress, dialogs)
    }

    #[test]
    fn test_failed_second_chunk_stops_progress_and_shows_reason() {
        let (progress, dialogs) = replay(
            RunKind::Speak,
            vec![
                SynthesisEvent::Started { total: 3 },
                SynthesisEvent::Progress { completed: 1, total: 3 },
                SynthesisEvent::Failed {
                    chunk_index: 1,
                    reason: "request rejected (429): Too many requests".to_string(),
                },
            ],
        );

        assert_eq!(progress, RunProgress { value: 1, max: 3 });
        assert_eq!(dialogs.len(), 1);
        assert_eq!(dialogs[0].level, DialogLevel::Error);
        assert!(dialogs[0].body.contains("Too many requests"));
        assert!(dialogs
            .iter()
            .all(|d| d.body != RunKind::Speak.success_message()));
    }

    #[test]
    fn test_finished_save_shows_success() {
        let (progress, dialogs) = replay(
            RunKind::Save,
            vec![
                SynthesisEvent::Started { total: 2 },
                SynthesisEvent::Progress { completed: 1, total: 2 },
                SynthesisEvent::Progress { completed: 2, total: 2 },
                SynthesisEvent::Finished { total: 2 },
            ],
        );

        assert_eq!(progress, RunProgress { value: 2, max: 2 });
        assert_eq!(dialogs, vec![DialogMessage::info(RunKind::Save.success_message())]);
    }

    #[test]
    fn test_cancelled_run_shows_no_dialog() {
        let (progress, dialogs) = replay(
            RunKind::Speak,
            vec![
                SynthesisEvent::Started { total: 3 },
                SynthesisEvent::Progress { completed: 1, total: 3 },
                SynthesisEvent::Cancelled { completed: 1 },
            ],
        );

        assert_eq!(progress, RunProgress { value: 1, max: 3 });
        assert!(dialogs.is_empty());
    }

    #[test]
    fn test_default_file_name() {
        let now = chrono::Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid local time");
        assert_eq!(default_file_name(now), "speech-20240309-070501.wav");
    }

    #[test]
    fn test_with_wav_extension() {
        assert_eq!(
            with_wav_extension(PathBuf::from("/tmp/out")),
            PathBuf::from("/tmp/out.wav")
        );
        assert_eq!(
            with_wav_extension(PathBuf::from("/tmp/out.wav")),
            PathBuf::from("/tmp/out.wav")
        );
        assert_eq!(
            with_wav_extension(PathBuf::from("/tmp/out.WAV")),
            PathBuf::from("/tmp/out.WAV")
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            failure_message("request rejected (401): Unauthorized"),
            "音声合成に失敗しました: request rejected (401): Unauthorized"
        );
        assert_ne!(
            RunKind::Speak.success_message(),
            RunKind::Save.success_message()
        );
    }
}
