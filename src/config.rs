//! Configuration file structures for the notifier.
//!
//! This module defines the configuration file format using YAML. Every section
//! is optional and falls back to its defaults.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Alert surface settings
//! surface:
//!   # Whether the platform can display the time remaining until a future instant
//!   future_anchored_elapsed: true
//!
//! # Haptic feedback settings
//! haptics:
//!   # Minimum delay between two vibrations, whatever their category
//!   suppress_window_ms: 5000
//!
//! # Texts displayed on the alert surface
//! strings:
//!   game_start: "Game starting"
//!   game_end: "Game over"
//!   round: "Jailbreak {0} of {1}"
//!   afoot: "Game afoot"
//!   flags: "Flags: {0} red / {1} yellow"
//!
//! # Replay of the recorded game feed
//! feed:
//!   # Delay between two replayed events, 0 to replay as fast as possible
//!   pacing_ms: 0
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any value can be overridden with a `CTFWS_` prefixed environment variable,
//! `__` separating the nested keys:
//!
//! ```bash
//! export CTFWS_HAPTICS__SUPPRESS_WINDOW_MS=2500
//! export CTFWS_SURFACE__FUTURE_ANCHORED_ELAPSED=false
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::alerts::{DEFAULT_SUPPRESS_WINDOW_MS, Strings};

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "CTFWS_";

/// Root configuration structure for the notifier.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alert surface configuration
    pub surface: Surface,
    /// Haptic feedback configuration
    pub haptics: Haptics,
    /// Texts of the alert surface
    pub strings: Strings,
    /// Recorded feed replay configuration
    pub feed: Feed,
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the environment overrides.
    ///
    /// # Errors
    ///
    /// Fails if the file doesn't exist or if a value has the wrong type.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).is_file() {
            bail!("config file {} not found", path);
        }

        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract::<Config>()
            .with_context(|| format!("invalid config file {}", path))
    }
}

/// Alert surface configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Surface {
    /// Whether the platform can display the time remaining until a future instant.
    ///
    /// When `true` the surface counts down to the end of the round, otherwise
    /// it counts up from the start of the round.
    pub future_anchored_elapsed: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Surface {
            future_anchored_elapsed: true,
        }
    }
}

/// Haptic feedback configuration.
///
/// Which categories vibrate is a user preference, see the `preferences.json`
/// file of the data directory.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Haptics {
    /// Suppression window shared by all haptic categories, in milliseconds
    pub suppress_window_ms: u64,
}

impl Default for Haptics {
    fn default() -> Self {
        Haptics {
            suppress_window_ms: DEFAULT_SUPPRESS_WINDOW_MS,
        }
    }
}

/// Recorded feed replay configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Feed {
    /// Delay between two replayed events, in milliseconds
    pub pacing_ms: u64,
}
