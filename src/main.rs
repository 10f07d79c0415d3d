//! ctfws-notifier - Alert surface controller for Capture the Flag with Stuff games.
//!
//! This is the main entry point of the notifier, which follows a timed Capture the
//! Flag with Stuff game and keeps a persistent alert surface up to date while the
//! game matters to the player.
//!
//! # Overview
//!
//! The game timer pushes four kinds of events: configuration changes, time ticks,
//! captured flag updates and broadcast messages. The notifier turns them into:
//!
//! - **An alert surface** shown while the game is afoot and hidden once it is over
//! - **A title** following the rounds (game starting, jailbreak `n` of `m`, game over)
//! - **A free text** shared by the captured flags and the latest message
//! - **Haptic feedback** per category, rate limited so that bursts never buzz twice
//!
//! # Configuration
//!
//! Create a `config.yaml` file, every section is optional:
//!
//! ```yaml
//! surface:
//!   future_anchored_elapsed: true
//! haptics:
//!   suppress_window_ms: 5000
//! feed:
//!   pacing_ms: 1000
//! ```
//!
//! Which haptic categories vibrate is a user preference stored in the
//! `preferences.json` file of the data directory:
//!
//! ```json
//! { "vibrate_break": true, "vibrate_flag": true, "vibrate_message": false }
//! ```
//!
//! A missing or unreadable preferences file disables every vibration.
//!
//! # Usage
//!
//! ```bash
//! ctfws-notifier --config config.yaml --data ./ctfws-data --feed game.jsonl
//! ```
//!
//! # Architecture
//!
//! - [`alerts`] - The alert controller, its haptic rate limiting and the capabilities it needs
//! - [`config`] - YAML configuration file structures with environment variable overrides
//! - [`game`] - Game snapshots, events, their dispatch and the recorded feed
//! - [`host`] - Console implementations of the capabilities
//! - [`notifier`] - Wiring of everything above
//! - [`utils`] - Data directory helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//! - `CTFWS_*` - Override configuration values, e.g. `CTFWS_FEED__PACING_MS=500`

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{config::Config, notifier::Notifier};

mod alerts;
mod config;
mod game;
mod host;
mod notifier;
mod utils;

/// Command-line arguments of the notifier.
///
/// # Examples
///
/// ```bash
/// ctfws-notifier --config config.yaml --data ./ctfws-data --feed game.jsonl
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `CTFWS_` prefixed environment variables.
    #[arg(short, long)]
    config: String,

    /// Path to the directory holding the user data.
    ///
    /// This directory contains `preferences.json`, the haptic preferences of the user.
    #[arg(short, long)]
    data: String,

    /// Path to the recorded game feed, one JSON event per line.
    #[arg(short, long)]
    feed: String,
}

/// Main entry point of the notifier.
///
/// 1. **Logging Setup**: `info` level by default, overridden by `RUST_LOG`
/// 2. **Argument Parsing**: with `clap`
/// 3. **Configuration Loading**: YAML file and `CTFWS_` environment overrides
/// 4. **Notifier Initialization**: capabilities, alert controller and game stream
/// 5. **Replay**: the game feed is delivered until its end or until Ctrl-C
///
/// Configuration and initialization errors are logged and end the process
/// without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting ctfws-notifier {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {:#}", e);
            return;
        }
    };

    let notifier = match Notifier::new(config, &args).await {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to initialize notifier: {:#}", e);
            return;
        }
    };

    if let Err(e) = notifier.start().await {
        error!("Failed to follow the game: {:#}", e);
    }
}
