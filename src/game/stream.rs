//! Routing of game events to their observers.
//!
//! This module provides the [`GameObserver`] trait implemented by anything that
//! reacts to the game state, and the [`GameStream`] which delivers every
//! [`GameEvent`] to the registered observers.

use std::sync::Arc;

use log::debug;
use mockall::automock;

use crate::game::structs::{GameEvent, GameSnapshot, Message};

/// Receiver of the game state events.
///
/// The stream holds a reference to this capability, never to the internals of
/// the implementor.
#[automock]
pub trait GameObserver {
    /// Called when the game configuration changed.
    async fn on_configure(&self, game: &GameSnapshot);
    /// Called on every time update, `now` in Unix seconds.
    async fn on_tick(&self, game: &GameSnapshot, now: i64);
    /// Called when the captured flag counts or their visibility changed.
    async fn on_flags_changed(&self, game: &GameSnapshot);
    /// Called when the message list changed. An empty list means it was cleared.
    async fn on_messages_changed(&self, game: &GameSnapshot, messages: &[Message]);
}

/// Delivers game events to observers in registration order.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// # async fn example(controller: Arc<AlertController>, event: GameEvent) {
/// let mut stream = GameStream::new();
/// stream.register_observer(controller);
/// stream.dispatch(&event).await;
/// # }
/// ```
pub struct GameStream<O: GameObserver> {
    /// Registered observers
    observers: Vec<Arc<O>>,
}

impl<O: GameObserver> GameStream<O> {
    /// Create a new [GameStream] without observers.
    pub fn new() -> Self {
        GameStream {
            observers: Vec::new(),
        }
    }

    /// Registers an observer, it will receive every subsequent event.
    pub fn register_observer(&mut self, observer: Arc<O>) {
        self.observers.push(observer);
    }

    /// Delivers an event to every registered observer.
    pub async fn dispatch(&self, event: &GameEvent) {
        debug!("dispatch {:?} to {} observers", event, self.observers.len());

        for observer in &self.observers {
            match event {
                GameEvent::Configure { game } => observer.on_configure(game).await,
                GameEvent::Tick { game, now } => observer.on_tick(game, *now).await,
                GameEvent::Flags { game } => observer.on_flags_changed(game).await,
                GameEvent::Messages { game, messages } => {
                    observer.on_messages_changed(game, messages).await
                }
            }
        }
    }
}

impl<O: GameObserver> Default for GameStream<O> {
    fn default() -> Self {
        GameStream::new()
    }
}
