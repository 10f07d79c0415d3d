//! Game state events and their delivery.
//!
//! This module models what the game timer pushes to the notifier and how it
//! gets there.
//!
//! # Modules
//!
//! - `structs` - Snapshot of the game state and the four event kinds
//! - `stream` - The [`GameObserver`] capability and the [`GameStream`] dispatching to it
//! - `feed` - Loading of a recorded event feed from a JSON lines file

mod feed;
mod stream;
mod structs;

pub use crate::game::feed::GameFeed;
pub use crate::game::stream::{GameObserver, GameStream};
pub use crate::game::structs::{GameEvent, GameSnapshot, Message};
