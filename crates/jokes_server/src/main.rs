//! Server entry point.
//!
//! Loads configuration from the environment, starts logging and serves until
//! Ctrl+C or SIGTERM.

use std::process::ExitCode;

use jokes_server::{config::Config, start_server};
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("jokes_server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = jokes_core::init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("jokes_server: {err}");
        return ExitCode::FAILURE;
    }

    match start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_stop module=server status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
