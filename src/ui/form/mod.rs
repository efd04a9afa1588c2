//! Main form
//!
//! Text box, voice picker, the three action buttons and the progress bar.

pub mod actions;

use crate::app::AppState;
use crate::types::voice::voice_options;
use crate::ui::components::dialog::MessageDialog;
use crate::ui::components::progress::ProgressBar;
use dioxus::prelude::*;

const STYLE: &str = r#"
:root {
    --bg: #f4f1ec;
    --surface: #ffffff;
    --border: #d8d2c8;
    --text: #2b2724;
    --accent: #2a6b7c;
    --warning: #c4993b;
    --error: #c0504d;
}
html, body, #main { height: 100%; margin: 0; }
body { background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; font-size: 14px; }
.form { display: flex; flex-direction: column; height: 100%; box-sizing: border-box; padding: 10px; gap: 8px; }
.text-input { flex: 1; min-height: 60px; resize: none; padding: 8px; border: 1px solid var(--border); border-radius: 6px; background: var(--surface); font-size: 15px; line-height: 1.5; }
.row { display: flex; align-items: center; gap: 8px; }
.btn { padding: 5px 14px; border: 1px solid var(--border); border-radius: 6px; background: var(--surface); cursor: pointer; }
.btn:disabled { opacity: 0.4; cursor: not-allowed; }
.btn-stop { border-color: var(--error); color: var(--error); }
.progress { width: 100%; height: 14px; }
.dialog-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; padding: 16px; }
.dialog { background: var(--surface); border-radius: 8px; padding: 16px 20px; max-width: 420px; width: 100%; box-shadow: 0 8px 24px rgba(0,0,0,0.2); }
.dialog-title { margin: 0 0 8px; font-size: 15px; }
.dialog-body { margin: 0 0 16px; white-space: pre-wrap; word-break: break-word; }
.dialog-footer { display: flex; justify-content: flex-end; }
"#;

#[component]
pub fn MainForm() -> Element {
    let app_state = use_context::<AppState>();
    let mut session = app_state.session;
    let progress = app_state.progress;
    let is_running = (app_state.is_running)();

    let text = session.read().text.clone();
    let voice = session.read().voice.clone();
    let options = voice_options(&voice);
    let run_progress = progress();

    let speak_state = app_state.clone();
    let save_state = app_state.clone();
    let stop_state = app_state.clone();

    rsx! {
        style { "{STYLE}" }

        div {
            class: "form",

            textarea {
                class: "text-input",
                value: "{text}",
                disabled: is_running,
                oninput: move |evt| session.write().text = evt.value(),
            }

            // Voice picker
            div {
                class: "row",
                label { r#for: "voice", "音声:" }
                select {
                    id: "voice",
                    disabled: is_running,
                    onchange: move |evt| session.write().voice = evt.value(),
                    for option_voice in options {
                        option {
                            key: "{option_voice}",
                            value: "{option_voice}",
                            selected: option_voice == voice,
                            "{option_voice}"
                        }
                    }
                }
            }

            // Actions
            div {
                class: "row",
                button {
                    class: "btn",
                    disabled: is_running,
                    onclick: move |_| actions::speak(speak_state.clone()),
                    "喋る"
                }
                button {
                    class: "btn",
                    disabled: is_running,
                    onclick: move |_| actions::save(save_state.clone()),
                    "音声保存"
                }
                button {
                    class: "btn",
                    disabled: is_running,
                    onclick: move |_| session.write().text.clear(),
                    "クリア"
                }
                if is_running {
                    button {
                        class: "btn btn-stop",
                        title: "現在のチャンクの後で停止",
                        onclick: move |_| actions::stop(&stop_state),
                        "停止"
                    }
                }
            }

            ProgressBar { value: run_progress.value, max: run_progress.max }
        }

        MessageDialog {}
    }
}
