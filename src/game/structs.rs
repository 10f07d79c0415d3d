//! Data structures describing the game state pushed by the game timer.
//!
//! The controller only reads these values, it never computes them.

use std::fmt;

use serde::Deserialize;

/// Snapshot of a running game at the moment an event was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameSnapshot {
    /// Current round, `0` before the game starts
    pub round: u32,
    /// Total number of rounds, the last one being the end of the game
    pub rounds: u32,
    /// Start of the current round, in Unix seconds
    pub round_start: i64,
    /// End of the current round, in Unix seconds
    pub round_end: i64,
    /// Human readable reason why the game is paused or stopped
    pub rationale: Option<String>,
    /// Whether the game has been stopped
    pub stop: bool,
    /// Whether the captured flags are shown to the players
    pub flags_visible: bool,
    /// Flags captured by the red team
    pub flags_red: u32,
    /// Flags captured by the yellow team
    pub flags_yel: u32,
    /// Messages broadcast to the players, oldest first
    pub messages: Vec<Message>,
}

impl GameSnapshot {
    /// Whether the game still matters to the user.
    ///
    /// A game is only irrelevant once it is stopped *and* a rationale explains why.
    /// A stopped game without rationale, or a game with a rationale that is not
    /// stopped (e.g. a delayed start), is still relevant.
    pub fn is_relevant(&self) -> bool {
        self.rationale.is_none() || !self.stop
    }

    /// Sum of the flags captured by both teams.
    pub fn flags_total(&self) -> u32 {
        self.flags_red.saturating_add(self.flags_yel)
    }
}

impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "round={}/{}, start={}, end={}, rationale={:?}, stop={}, flags={}:{}/{}, messages={}",
            self.round,
            self.rounds,
            self.round_start,
            self.round_end,
            self.rationale,
            self.stop,
            self.flags_visible,
            self.flags_red,
            self.flags_yel,
            self.messages.len()
        )
    }
}

/// A message broadcast by the game organisers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// When the message was sent, in Unix seconds
    pub when: i64,
    /// Message content
    pub text: String,
}

/// Event emitted by the game state stream.
///
/// Every variant carries the snapshot the event was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The game configuration changed
    Configure { game: GameSnapshot },
    /// Periodic time update, `now` in Unix seconds
    Tick { game: GameSnapshot, now: i64 },
    /// The captured flag counts or their visibility changed
    Flags { game: GameSnapshot },
    /// The message list changed, an empty list means it was cleared
    Messages {
        game: GameSnapshot,
        #[serde(default)]
        messages: Vec<Message>,
    },
}

impl GameEvent {
    /// Snapshot carried by the event.
    pub fn game(&self) -> &GameSnapshot {
        match self {
            GameEvent::Configure { game }
            | GameEvent::Tick { game, .. }
            | GameEvent::Flags { game }
            | GameEvent::Messages { game, .. } => game,
        }
    }
}
