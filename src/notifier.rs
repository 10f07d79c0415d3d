//! Notifier wiring the game feed to the alert controller.
//!
//! This module provides the [`Notifier`] which builds the host capabilities,
//! registers the [`AlertController`] on the [`GameStream`] and replays the
//! recorded game feed through it.
//!
//! # Runtime Behavior
//!
//! ```text
//! GameFeed → GameStream → AlertController → ConsoleSurface / ProcessKeepAlive
//! ```
//!
//! The replay stops at the end of the feed or on Ctrl-C. Either way the
//! controller is detached, which hides the surface and releases the binding.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::{Result, bail};
use log::{debug, error, info};
use tokio::{signal, time};

use crate::{
    Args,
    alerts::{AlertController, Capabilities, ElapsedAnchor},
    config::Config,
    game::{GameEvent, GameFeed, GameStream},
    host::{ConsoleSurface, FilePreferences, ProcessKeepAlive, SystemClock},
    utils::{PREFERENCES_FILE, data_file},
};

/// Runs the alert controller against a recorded game feed.
pub struct Notifier {
    /// Controller owning the alert surface
    controller: Arc<AlertController>,
    /// Stream the controller listens to
    stream: GameStream<AlertController>,
    /// Recorded events to replay
    feed: GameFeed,
    /// Delay between two replayed events
    pacing: Duration,
}

impl Notifier {
    /// Creates a new `Notifier` from the configuration and the command line.
    ///
    /// # Errors
    ///
    /// Fails if the data directory doesn't exist.
    pub async fn new(config: Config, args: &Args) -> Result<Self> {
        if !Path::new(&args.data).is_dir() {
            bail!("data directory {} not found", args.data);
        }

        let preferences = FilePreferences::load(&data_file(&args.data, PREFERENCES_FILE)).await;
        let capabilities = Capabilities {
            surface: Box::new(ConsoleSurface::new()),
            keep_alive: Box::new(ProcessKeepAlive::new()),
            preferences: Box::new(preferences),
            clock: Box::new(SystemClock),
        };

        let anchor = ElapsedAnchor::from_capability(config.surface.future_anchored_elapsed);
        info!("elapsed time anchored with {:?}", anchor);

        let controller = Arc::new(AlertController::new(
            capabilities,
            config.strings,
            anchor,
            config.haptics.suppress_window_ms,
        ));

        let mut stream = GameStream::new();
        stream.register_observer(Arc::clone(&controller));

        Ok(Notifier {
            controller,
            stream,
            feed: GameFeed::new(args.feed.clone()),
            pacing: Duration::from_millis(config.feed.pacing_ms),
        })
    }

    /// Replays the feed until its end or until Ctrl-C, then detaches the controller.
    ///
    /// # Errors
    ///
    /// Fails if the feed cannot be loaded, before any event is delivered.
    pub async fn start(&self) -> Result<()> {
        let events = self.feed.load().await?;

        tokio::select! {
            _ = self.replay(&events) => info!("game feed finished"),
            result = signal::ctrl_c() => match result {
                Ok(()) => info!("interrupted, stop following the game"),
                Err(e) => error!("failed to listen for Ctrl-C: {}", e),
            },
        }

        self.controller.detach().await;
        Ok(())
    }

    /// Delivers every event to the stream, waiting `pacing` between two of them.
    async fn replay(&self, events: &[GameEvent]) {
        for (index, event) in events.iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                time::sleep(self.pacing).await;
            }
            debug!("replay event {}/{} for {}", index + 1, events.len(), event.game());
            self.stream.dispatch(event).await;
        }
    }
}
