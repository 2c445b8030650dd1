//! `bacli` is a small CLI to inspect jobs and executions of a Bacalhau orchestrator. It mainly
//! uses `clap` and `reqwest` under the hood.
//!
//! The main logic for the application can be found in `clap_app.rs`, the API client and models
//! live in the `bacli` library.

mod clap_app;
mod clap_models;

use crate::clap_app::init_cli;

#[tokio::main]
async fn main() {
    // enable logger
    env_logger::init();

    // Enable virtual terminal to correctly colorize output on Windows 10 machines
    #[cfg(target_os = "windows")]
    let _ = colored::control::set_virtual_terminal(true);

    init_cli().await;
}
