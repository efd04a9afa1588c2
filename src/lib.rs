//! Yomiage Library
//!
//! Core library for the Yomiage text-to-speech desktop application.

pub mod app;
pub mod speech;
pub mod storage;
pub mod types;
pub mod ui;
