//! Session state types
//!
//! Window geometry plus the last text and voice, restored on startup and
//! saved on exit.

use crate::types::voice::DEFAULT_VOICE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;

/// Window size and position in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    /// `None` lets the window manager place the window
    pub position: Option<(i32, i32)>,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            position: None,
        }
    }
}

/// Persisted session record
///
/// Every key is optional on read; missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: None,
            y: None,
            text: String::new(),
            voice: default_voice(),
        }
    }
}

impl SessionState {
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            width: self.width,
            height: self.height,
            position: self.x.zip(self.y),
        }
    }

    pub fn set_geometry(&mut self, geometry: WindowGeometry) {
        self.width = geometry.width;
        self.height = geometry.height;
        self.x = geometry.position.map(|(x, _)| x);
        self.y = geometry.position.map(|(_, y)| y);
    }

    /// Record to write on exit; the text is stored trimmed
    pub fn for_save(&self) -> SessionState {
        SessionState {
            text: self.text.trim().to_string(),
            ..self.clone()
        }
    }

    /// Clamp obviously broken values (zero-sized windows, empty voice).
    ///
    /// Applied when the window is built, not on load, so a saved record
    /// always reads back unchanged.
    pub fn validate(&mut self) {
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        if self.height == 0 {
            self.height = DEFAULT_HEIGHT;
        }
        if self.voice.trim().is_empty() {
            self.voice = default_voice();
        }
    }
}
