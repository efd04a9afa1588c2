//! Shared type definitions
//!
//! This module contains the data types passed between storage, speech and UI.

pub mod config;
pub mod session;
pub mod voice;
