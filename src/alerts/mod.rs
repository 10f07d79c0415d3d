//! Alert surface management for Capture the Flag with Stuff games.
//!
//! This module decides what the user sees and feels while following a game.
//! It consists of four parts:
//!
//! - [`AlertController`]: Reacts to the game events, shows or hides the alert surface
//!   and arbitrates which source owns its free text
//! - `haptics`: Vibration patterns per category and the shared haptic limiter
//! - `surface`: The capabilities the host supplies ([`SurfaceSink`], [`KeepAlive`],
//!   [`PreferenceStore`], [`Clock`]) and the [`SurfacePayload`] handed to the surface
//! - `text`: The localizable [`Strings`] displayed on the surface
//!
//! # Architecture
//!
//! ```text
//! GameStream ──► AlertController ──► SurfaceSink (publish / hide)
//!                     │    │
//!                     │    └───────► KeepAlive (acquire / release)
//!                     └──► limiter ─────► PreferenceStore, Clock
//! ```
//!
//! The surface is shown while the game is relevant to the user and hidden as
//! soon as a tick reports it stopped with a rationale. Flags and messages
//! compete for the free text of the surface, the last one to write it owns it.

mod alert_controller;
mod haptics;
mod surface;
mod text;

pub use crate::alerts::alert_controller::{AlertController, ElapsedAnchor};
pub use crate::alerts::haptics::DEFAULT_SUPPRESS_WINDOW_MS;
pub use crate::alerts::surface::{
    Capabilities, Clock, KeepAlive, KeepAliveError, PreferenceStore, SurfaceError,
    SurfacePayload, SurfaceSink,
};
pub use crate::alerts::text::Strings;
