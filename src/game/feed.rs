//! Recorded game event feed.
//!
//! This module provides the [`GameFeed`] which reads a stream of game events
//! recorded as JSON lines, one [`GameEvent`] per line:
//!
//! ```text
//! # game starts in a few minutes
//! {"event":"tick","now":1000,"game":{"round":0,"rounds":5,"round_start":900,"round_end":1200}}
//! {"event":"flags","game":{"flags_visible":true,"flags_red":1,"flags_yel":0}}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use anyhow::{Context, Result};
use log::{debug, info};
use tokio::fs;

use crate::game::structs::GameEvent;

/// Loader for a recorded game event feed.
#[derive(Clone)]
pub struct GameFeed {
    /// Path to the JSON lines file
    path: String,
}

impl GameFeed {
    /// Creates a new `GameFeed` reading the specified file.
    pub fn new(path: String) -> Self {
        GameFeed { path }
    }

    /// Reads and parses every event of the feed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or if a line is not a valid event. The
    /// error names the offending line.
    pub async fn load(&self) -> Result<Vec<GameEvent>> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read game feed {}", self.path))?;

        let events = parse_events(&content)?;
        info!("loaded {} game events from {}", events.len(), self.path);

        Ok(events)
    }
}

/// Parses JSON lines into game events.
fn parse_events(content: &str) -> Result<Vec<GameEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| -> Result<GameEvent> {
            let event: GameEvent = serde_json::from_str(line)
                .with_context(|| format!("invalid game event at line {}", index + 1))?;
            debug!("parsed event {:?}", event);
            Ok(event)
        })
        .collect()
}
