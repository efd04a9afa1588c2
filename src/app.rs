//! Root Dioxus application component
//!
//! This module contains the window launch configuration, the shared
//! `AppState` and the root `App` component.

use crate::speech::SpeechProvider;
use crate::storage::session::save_session;
use crate::types::session::{SessionState, WindowGeometry};
use crate::ui::components::dialog::DialogMessage;
use crate::ui::MainForm;
use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::{
    use_window, use_wry_event_handler, Config, DesktopContext, LogicalPosition, LogicalSize,
    WindowBuilder,
};
use dioxus::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub const WINDOW_TITLE: &str = "Text to Speech";

/// Values prepared before the window opens
#[derive(Clone)]
pub struct Startup {
    pub provider: Arc<dyn SpeechProvider>,
    pub session: SessionState,
}

/// Progress bar state: `value` of `max` chunks done
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct RunProgress {
    pub value: usize,
    pub max: usize,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SpeechProvider>,
    /// Current text and voice; geometry is filled in on close
    pub session: Signal<SessionState>,
    pub progress: Signal<RunProgress>,
    pub is_running: Signal<bool>,
    pub dialog: Signal<Option<DialogMessage>>,
    pub stop_signal: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(startup: Startup) -> Self {
        tracing::info!(provider = startup.provider.name(), "AppState initialized");
        Self {
            provider: startup.provider,
            session: Signal::new(startup.session),
            progress: Signal::new(RunProgress::default()),
            is_running: Signal::new(false),
            dialog: Signal::new(None),
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Open the main window and run the event loop
pub fn launch(mut startup: Startup) {
    startup.session.validate();
    let geometry = startup.session.geometry();
    tracing::info!(
        "Opening {}x{} window at {:?}",
        geometry.width,
        geometry.height,
        geometry.position
    );

    let mut window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(geometry.width as f64, geometry.height as f64));
    if let Some((x, y)) = geometry.position {
        window = window.with_position(LogicalPosition::new(x as f64, y as f64));
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .with_context(startup)
        .launch(App);
}

#[component]
pub fn App() -> Element {
    let startup = use_context::<Startup>();
    let app_state = use_context_provider(|| AppState::new(startup));

    {
        let session = app_state.session;
        let desktop = use_window();
        use_wry_event_handler(move |event, _| {
            if let Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } = event
            {
                let mut state = (*session.peek()).clone();
                if let Some(geometry) = current_geometry(&desktop) {
                    state.set_geometry(geometry);
                }
                persist_session(&state);
            }
        });
    }

    rsx! {
        MainForm {}
    }
}

/// Window size and outer position in logical pixels
fn current_geometry(window: &DesktopContext) -> Option<WindowGeometry> {
    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<u32>(scale);
    if size.width == 0 || size.height == 0 {
        // Minimized windows report a zero size
        return None;
    }
    let position = window
        .outer_position()
        .ok()
        .map(|p| p.to_logical::<i32>(scale))
        .map(|p| (p.x, p.y));

    Some(WindowGeometry {
        width: size.width,
        height: size.height,
        position,
    })
}

fn persist_session(state: &SessionState) {
    match save_session(&state.for_save()) {
        Ok(()) => tracing::info!("Session saved"),
        Err(e) => tracing::error!("Failed to save session: {}", e),
    }
}
