pub mod dialog;
pub mod progress;
