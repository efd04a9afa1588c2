//! Message dialog UI component
//!
//! Blocking-style modal shown for warnings, failures and completion notices.
//! Nothing else in the window can be used until it is dismissed.

use crate::app::AppState;
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DialogLevel {
    Info,
    Warning,
    Error,
}

/// A message waiting to be acknowledged
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DialogMessage {
    pub level: DialogLevel,
    pub title: String,
    pub body: String,
}

impl DialogMessage {
    pub fn info(body: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Info,
            title: "成功".to_string(),
            body: body.into(),
        }
    }

    pub fn warning(body: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Warning,
            title: "警告".to_string(),
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Error,
            title: "エラー".to_string(),
            body: body.into(),
        }
    }
}

/// Message dialog component
#[component]
pub fn MessageDialog() -> Element {
    let app_state = use_context::<AppState>();
    let mut dialog = app_state.dialog;

    let Some(message) = dialog() else {
        return rsx! {};
    };

    let accent = match message.level {
        DialogLevel::Info => "var(--accent)",
        DialogLevel::Warning => "var(--warning)",
        DialogLevel::Error => "var(--error)",
    };

    rsx! {
        // Backdrop
        div {
            class: "dialog-backdrop",

            div {
                class: "dialog",
                role: "alertdialog",
                style: "border-top: 3px solid {accent};",

                h2 { class: "dialog-title", "{message.title}" }
                p { class: "dialog-body", "{message.body}" }

                div {
                    class: "dialog-footer",
                    button {
                        class: "btn",
                        autofocus: true,
                        onclick: move |_| dialog.set(None),
                        "OK"
                    }
                }
            }
        }
    }
}
