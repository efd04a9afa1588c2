//! Yomiage desktop entry point
//!
//! Credentials are checked before the window opens; any problem with them is
//! shown in a native dialog and ends the process.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use yomiage::app::{launch, Startup};
use yomiage::speech::AzureSpeechClient;
use yomiage::storage::credentials::load_credentials;
use yomiage::storage::session::load_session;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("yomiage starting");

    let credentials = match load_credentials() {
        Ok(credentials) => credentials,
        Err(e) => fatal(&e.to_string()),
    };

    let provider = match AzureSpeechClient::new(&credentials) {
        Ok(provider) => provider,
        Err(e) => fatal(&e.to_string()),
    };

    let session = load_session();

    launch(Startup {
        provider: Arc::new(provider),
        session,
    });

    tracing::info!("yomiage shut down");
}

/// Report a startup failure and exit without opening the window
fn fatal(message: &str) -> ! {
    tracing::error!("{}", message);
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("エラー")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
    std::process::exit(1);
}
