//! Puzzle agent: connect to the host, play until it closes the session.
//!
//! Configured through `SERVER`, `PORT`, `NAME`, `KEY_DEADLINE_MS`, `RETRY`
//! and `MAX_EXPANSIONS`; log level through `RUST_LOG` (default `info`).

use std::process::ExitCode;

use rushlane_agent::clock::SystemClock;
use rushlane_agent::config::AgentConfig;
use rushlane_agent::dispatch::{Dispatcher, SessionSummary};
use rushlane_agent::error::AgentError;
use rushlane_agent::ws::WebSocketChannel;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match play() {
        Ok(summary) => {
            match serde_json::to_string(&summary) {
                Ok(json) => log::info!("summary {json}"),
                Err(e) => log::warn!("summary not serializable: {e}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn play() -> Result<SessionSummary, AgentError> {
    let config = AgentConfig::from_env()?;
    let url = config.url();
    log::info!(
        "connecting to {url} as {:?} (deadline {}ms, retry {})",
        config.name,
        config.key_deadline.as_millis(),
        config.retry
    );
    let mut channel = WebSocketChannel::connect(&url)?;
    Dispatcher::new(&config, SystemClock).run(&mut channel)
}
