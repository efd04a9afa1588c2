//! UI components
//!
//! This module contains the single form window and its building blocks.

pub mod components;
pub mod form;

pub use form::MainForm;
