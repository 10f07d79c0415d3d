//! Alert controller driving the alert surface from the game state.
//!
//! This module provides the [`AlertController`] which listens to the game events,
//! decides when the persistent alert surface is shown or hidden, arbitrates which
//! source owns its free text and rate limits the haptic feedback.

use log::{debug, error, info, warn};
use tokio::sync::Mutex;

use crate::{
    alerts::{
        haptics::{HapticCategory, HapticLimiter, HapticPattern},
        surface::{Capabilities, SurfacePayload},
        text::Strings,
    },
    game::{GameObserver, GameSnapshot, Message},
};

/// Category which last wrote the free text of the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextSource {
    /// Nobody since the surface was shown, ready for a takeover
    #[default]
    None,
    /// The captured flags
    Flag,
    /// The broadcast messages
    Message,
}

/// How the host renders the elapsed time of the surface.
///
/// Decided once by the host from the platform capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedAnchor {
    /// The platform can count down to a future instant: the end of the round
    UntilRoundEnd,
    /// The platform only counts up: from the start of the round
    SinceRoundStart,
}

impl ElapsedAnchor {
    /// Picks the anchor from the "future anchored elapsed display" capability.
    pub fn from_capability(future_anchored: bool) -> Self {
        if future_anchored {
            ElapsedAnchor::UntilRoundEnd
        } else {
            ElapsedAnchor::SinceRoundStart
        }
    }

    /// Reference instant of the elapsed time display, in Unix milliseconds.
    pub fn reference_ms(&self, game: &GameSnapshot) -> i64 {
        let seconds = match self {
            ElapsedAnchor::UntilRoundEnd => game.round_end.saturating_add(1),
            ElapsedAnchor::SinceRoundStart => game.round_start,
        };
        seconds.saturating_mul(1000)
    }
}

/// Everything guarded by the controller lock.
///
/// `surface_active` is true exactly while the keep-alive binding is held.
#[derive(Debug)]
struct AlertState {
    /// Whether the surface is published
    surface_active: bool,
    /// Owner of the free text
    text_source: TextSource,
    /// Last title shown
    title: Option<String>,
    /// Last subtext shown
    subtext: Option<String>,
    /// Last free text shown
    free_text: Option<String>,
    /// Reference instant for the elapsed time display
    elapsed_reference_ms: Option<i64>,
    /// Haptic rate limiter
    haptics: HapticLimiter,
}

impl AlertState {
    fn new(suppress_window_ms: u64) -> Self {
        AlertState {
            surface_active: false,
            text_source: TextSource::None,
            title: None,
            subtext: None,
            free_text: None,
            elapsed_reference_ms: None,
            haptics: HapticLimiter::new(suppress_window_ms),
        }
    }

    fn payload(&self, haptic: Option<HapticPattern>) -> SurfacePayload {
        SurfacePayload {
            title: self.title.clone(),
            subtext: self.subtext.clone(),
            free_text: self.free_text.clone(),
            elapsed_reference_ms: self.elapsed_reference_ms,
            haptic,
        }
    }

    /// Shows the surface, taking the keep-alive binding if needed.
    ///
    /// A freshly shown surface starts with an empty free text nobody owns.
    fn show(&mut self, capabilities: &Capabilities, haptic: Option<HapticPattern>) {
        if !self.surface_active {
            if let Err(e) = capabilities.keep_alive.acquire() {
                error!("failed to acquire keep-alive binding, surface not shown: {}", e);
                return;
            }
            info!("show alert surface");
            self.surface_active = true;
            self.text_source = TextSource::None;
            self.free_text = None;
        }

        self.refresh(capabilities, haptic);
    }

    /// Republishes the surface if it is shown.
    fn refresh(&self, capabilities: &Capabilities, haptic: Option<HapticPattern>) {
        if !self.surface_active {
            debug!("alert surface hidden, skip publish");
            return;
        }

        let payload = self.payload(haptic);
        debug!("publish {:?}", payload);
        if let Err(e) = capabilities.surface.publish(&payload) {
            warn!("failed to publish alert surface: {}", e);
        }
    }

    /// Hides the surface and gives the keep-alive binding back.
    fn hide(&mut self, capabilities: &Capabilities) {
        if !self.surface_active {
            return;
        }

        info!("hide alert surface");
        if let Err(e) = capabilities.surface.hide() {
            warn!("failed to hide alert surface: {}", e);
        }
        if let Err(e) = capabilities.keep_alive.release() {
            warn!("failed to release keep-alive binding: {}", e);
        }
        self.surface_active = false;
    }
}

/// Translates game events into alert surface and haptic actions.
///
/// The controller is the only one deciding whether the surface is shown. It
/// shows it while the game is relevant to the user (see
/// [`GameSnapshot::is_relevant`]) and hides it otherwise. The free text of the
/// surface is shared by the flags and the messages: the last one to write it
/// owns it.
///
/// # Thread Safety
///
/// Every handler takes the same lock before touching the surface, the binding
/// or the haptic limiter, so concurrent ticks never acquire the binding twice.
///
/// # Examples
///
/// ```no_run
/// # async fn example(capabilities: Capabilities, game: GameSnapshot) {
/// let controller = AlertController::new(
///     capabilities,
///     Strings::default(),
///     ElapsedAnchor::UntilRoundEnd,
///     5000,
/// );
/// controller.on_tick(&game, 1_000).await;
/// controller.detach().await;
/// # }
/// ```
pub struct AlertController {
    /// State guarded by the controller lock
    state: Mutex<AlertState>,
    /// Host capabilities
    capabilities: Capabilities,
    /// Templates of the surface texts
    strings: Strings,
    /// Elapsed time policy of the host
    anchor: ElapsedAnchor,
}

impl AlertController {
    /// Creates a new `AlertController` with a hidden surface.
    ///
    /// # Arguments
    ///
    /// * `capabilities` - Surface, binding, preferences and clock of the host
    /// * `strings` - Templates of the surface texts
    /// * `anchor` - Elapsed time policy supported by the host
    /// * `suppress_window_ms` - Haptic suppression window shared by all categories
    pub fn new(
        capabilities: Capabilities,
        strings: Strings,
        anchor: ElapsedAnchor,
        suppress_window_ms: u64,
    ) -> Self {
        AlertController {
            state: Mutex::new(AlertState::new(suppress_window_ms)),
            capabilities,
            strings,
            anchor,
        }
    }

    /// Hides the surface and releases the binding when the host stops following the game.
    pub async fn detach(&self) {
        info!("detach alert controller");
        let mut state = self.state.lock().await;
        state.hide(&self.capabilities);
    }

    /// Asks the limiter for a pattern to go with the next publish.
    fn request_haptic(
        &self,
        state: &mut AlertState,
        category: HapticCategory,
    ) -> Option<HapticPattern> {
        let now_ms = self.capabilities.clock.now_millis();
        state
            .haptics
            .request(category, now_ms, self.capabilities.preferences.as_ref())
    }
}

impl GameObserver for AlertController {
    async fn on_configure(&self, game: &GameSnapshot) {
        debug!("game configured {}", game);
    }

    async fn on_tick(&self, game: &GameSnapshot, now: i64) {
        let mut state = self.state.lock().await;

        if !game.is_relevant() {
            debug!("game no longer relevant at {}: {}", now, game);
            state.hide(&self.capabilities);
            return;
        }

        state.elapsed_reference_ms = Some(self.anchor.reference_ms(game));
        match &game.rationale {
            None => {
                state.subtext = Some(self.strings.afoot.clone());
                state.title = Some(self.strings.round_title(game));
            }
            Some(rationale) => state.subtext = Some(rationale.clone()),
        }

        let haptic = self.request_haptic(&mut state, HapticCategory::Break);
        state.show(&self.capabilities, haptic);
    }

    async fn on_flags_changed(&self, game: &GameSnapshot) {
        let mut state = self.state.lock().await;

        // A reset to zero must not grab the free text, unless the flags own it
        // and need the correction.
        if !game.flags_visible
            || (state.text_source != TextSource::Flag && game.flags_total() == 0)
        {
            debug!("ignore flags update {}", game);
            return;
        }

        let haptic = self.request_haptic(&mut state, HapticCategory::Flag);
        state.text_source = TextSource::Flag;
        state.free_text = Some(self.strings.flags_text(game));
        state.refresh(&self.capabilities, haptic);
    }

    async fn on_messages_changed(&self, _game: &GameSnapshot, messages: &[Message]) {
        // An empty list is a clear, it leaves the surface alone
        let Some(message) = messages.last() else {
            debug!("messages cleared");
            return;
        };

        debug!("latest message sent at {}: {}", message.when, message.text);

        let mut state = self.state.lock().await;
        let haptic = self.request_haptic(&mut state, HapticCategory::Message);
        state.text_source = TextSource::Message;
        state.free_text = Some(message.text.clone());
        state.refresh(&self.capabilities, haptic);
    }
}

impl Drop for AlertController {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.surface_active {
            warn!("alert controller dropped with a shown surface, releasing it");
            state.hide(&self.capabilities);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{
        haptics::DEFAULT_SUPPRESS_WINDOW_MS,
        surface::{
            KeepAliveError, MockClock, MockKeepAlive, MockPreferenceStore, MockSurfaceSink,
            SurfaceError,
        },
    };
    use std::sync::{
        Arc,
        atomic::{AtomicI64, AtomicUsize, Ordering},
    };

    /// Shared view on what the mocked host capabilities received.
    #[derive(Default)]
    struct Harness {
        published: Arc<std::sync::Mutex<Vec<SurfacePayload>>>,
        hides: Arc<AtomicUsize>,
        acquires: Arc<AtomicUsize>,
        releases: Arc<AtomicUsize>,
        now: Arc<AtomicI64>,
    }

    impl Harness {
        fn controller(&self, vibrate: bool) -> AlertController {
            self.controller_with(vibrate, false, false, ElapsedAnchor::UntilRoundEnd)
        }

        fn controller_with(
            &self,
            vibrate: bool,
            acquire_fails: bool,
            publish_fails: bool,
            anchor: ElapsedAnchor,
        ) -> AlertController {
            let mut surface = MockSurfaceSink::new();
            let published = Arc::clone(&self.published);
            surface.expect_publish().returning(move |payload| {
                published.lock().unwrap().push(payload.clone());
                if publish_fails {
                    Err(SurfaceError::Rejected("no permission".to_string()))
                } else {
                    Ok(())
                }
            });
            let hides = Arc::clone(&self.hides);
            surface.expect_hide().returning(move || {
                hides.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

            let mut keep_alive = MockKeepAlive::new();
            let acquires = Arc::clone(&self.acquires);
            keep_alive.expect_acquire().returning(move || {
                if acquire_fails {
                    return Err(KeepAliveError::AlreadyHeld);
                }
                acquires.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            let releases = Arc::clone(&self.releases);
            keep_alive.expect_release().returning(move || {
                releases.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

            let mut preferences = MockPreferenceStore::new();
            preferences
                .expect_get_bool()
                .returning(move |_, _| vibrate);

            let mut clock = MockClock::new();
            let now = Arc::clone(&self.now);
            clock
                .expect_now_millis()
                .returning(move || now.load(Ordering::SeqCst));

            AlertController::new(
                Capabilities {
                    surface: Box::new(surface),
                    keep_alive: Box::new(keep_alive),
                    preferences: Box::new(preferences),
                    clock: Box::new(clock),
                },
                Strings::default(),
                anchor,
                DEFAULT_SUPPRESS_WINDOW_MS,
            )
        }

        fn publish_count(&self) -> usize {
            self.published.lock().unwrap().len()
        }

        fn last_published(&self) -> SurfacePayload {
            self.published.lock().unwrap().last().cloned().unwrap()
        }

        fn advance(&self, millis: i64) {
            self.now.fetch_add(millis, Ordering::SeqCst);
        }
    }

    fn game(round: u32, rounds: u32) -> GameSnapshot {
        GameSnapshot {
            round,
            rounds,
            round_start: 1_000,
            round_end: 1_900,
            ..Default::default()
        }
    }

    fn flags(visible: bool, red: u32, yel: u32) -> GameSnapshot {
        GameSnapshot {
            flags_visible: visible,
            flags_red: red,
            flags_yel: yel,
            ..game(1, 5)
        }
    }

    fn message(text: &str) -> Message {
        Message {
            when: 1_200,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_elapsed_anchor_reference() {
        let game = game(1, 5);

        assert_eq!(ElapsedAnchor::from_capability(true), ElapsedAnchor::UntilRoundEnd);
        assert_eq!(ElapsedAnchor::UntilRoundEnd.reference_ms(&game), 1_901_000);
        assert_eq!(ElapsedAnchor::SinceRoundStart.reference_ms(&game), 1_000_000);
    }

    #[tokio::test]
    async fn test_configure_does_nothing() {
        let harness = Harness::default();
        let controller = harness.controller(true);

        controller.on_configure(&game(0, 5)).await;

        assert_eq!(harness.publish_count(), 0);
        let state = controller.state.lock().await;
        assert!(!state.surface_active);
        assert_eq!(state.text_source, TextSource::None);
        assert_eq!(state.haptics.last_vibrate_at(), None);
    }

    #[tokio::test]
    async fn test_tick_at_start_shows_surface() {
        let harness = Harness::default();
        let controller = harness.controller(false);

        controller.on_tick(&game(0, 5), 950).await;

        assert_eq!(harness.acquires.load(Ordering::SeqCst), 1);
        assert_eq!(
            harness.last_published(),
            SurfacePayload {
                title: Some("Game starting".to_string()),
                subtext: Some("Game afoot".to_string()),
                free_text: None,
                elapsed_reference_ms: Some(1_901_000),
                haptic: None,
            }
        );
        let state = controller.state.lock().await;
        assert!(state.surface_active);
        assert_eq!(state.text_source, TextSource::None);
    }

    #[tokio::test]
    async fn test_tick_titles_follow_rounds() {
        let harness = Harness::default();
        let controller = harness.controller(false);

        controller.on_tick(&game(2, 5), 1_000).await;
        assert_eq!(
            harness.last_published().title.as_deref(),
            Some("Jailbreak 2 of 4")
        );

        controller.on_tick(&game(5, 5), 2_000).await;
        assert_eq!(harness.last_published().title.as_deref(), Some("Game over"));
        assert_eq!(harness.acquires.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_tick_since_round_start_anchor() {
        let harness = Harness::default();
        let controller =
            harness.controller_with(false, false, false, ElapsedAnchor::SinceRoundStart);

        controller.on_tick(&game(1, 5), 1_100).await;

        assert_eq!(harness.last_published().elapsed_reference_ms, Some(1_000_000));
    }

    #[tokio::test]
    async fn test_tick_rationale_replaces_subtext_only() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(2, 5), 1_000).await;

        let delayed = GameSnapshot {
            rationale: Some("weather delay".to_string()),
            ..game(3, 5)
        };
        controller.on_tick(&delayed, 1_500).await;

        let payload = harness.last_published();
        assert_eq!(payload.subtext.as_deref(), Some("weather delay"));
        assert_eq!(payload.title.as_deref(), Some("Jailbreak 2 of 4"));
    }

    #[tokio::test]
    async fn test_tick_stopped_with_rationale_hides_surface() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(2, 5), 1_000).await;
        controller.on_messages_changed(&game(2, 5), &[message("regroup")]).await;

        let ended = GameSnapshot {
            rationale: Some("final".to_string()),
            stop: true,
            ..game(5, 5)
        };
        controller.on_tick(&ended, 2_000).await;

        assert_eq!(harness.hides.load(Ordering::SeqCst), 1);
        assert_eq!(harness.releases.load(Ordering::SeqCst), 1);
        let state = controller.state.lock().await;
        assert!(!state.surface_active);
        assert_eq!(state.text_source, TextSource::Message);
        assert_eq!(state.free_text.as_deref(), Some("regroup"));
    }

    #[tokio::test]
    async fn test_tick_irrelevant_while_hidden_does_nothing() {
        let harness = Harness::default();
        let controller = harness.controller(false);

        let ended = GameSnapshot {
            rationale: Some("final".to_string()),
            stop: true,
            ..game(5, 5)
        };
        controller.on_tick(&ended, 2_000).await;

        assert_eq!(harness.hides.load(Ordering::SeqCst), 0);
        assert_eq!(harness.releases.load(Ordering::SeqCst), 0);
        assert_eq!(harness.publish_count(), 0);
    }

    #[tokio::test]
    async fn test_tick_is_idempotent_and_keeps_free_text() {
        let harness = Harness::default();
        let controller = harness.controller(false);

        controller.on_tick(&game(2, 5), 1_000).await;
        let first = harness.last_published();
        controller.on_messages_changed(&game(2, 5), &[message("hold")]).await;
        controller.on_tick(&game(2, 5), 1_000).await;
        let second = harness.last_published();

        assert_eq!(first.title, second.title);
        assert_eq!(first.subtext, second.subtext);
        assert_eq!(second.free_text.as_deref(), Some("hold"));
        assert_eq!(harness.acquires.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reshown_surface_resets_free_text() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;
        controller.on_flags_changed(&flags(true, 2, 1)).await;

        let paused = GameSnapshot {
            rationale: Some("lightning".to_string()),
            stop: true,
            ..game(1, 5)
        };
        controller.on_tick(&paused, 1_100).await;
        controller.on_tick(&game(2, 5), 1_200).await;

        assert_eq!(harness.acquires.load(Ordering::SeqCst), 2);
        assert_eq!(harness.last_published().free_text, None);
        assert_eq!(controller.state.lock().await.text_source, TextSource::None);
    }

    #[tokio::test]
    async fn test_flags_hidden_are_ignored() {
        let harness = Harness::default();
        let controller = harness.controller(true);
        controller.on_tick(&game(1, 5), 1_000).await;
        let published = harness.publish_count();

        controller.on_flags_changed(&flags(false, 3, 2)).await;

        assert_eq!(harness.publish_count(), published);
        let state = controller.state.lock().await;
        assert_eq!(state.text_source, TextSource::None);
        assert_eq!(state.free_text, None);
    }

    #[tokio::test]
    async fn test_flags_update_free_text() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;

        controller.on_flags_changed(&flags(true, 2, 1)).await;

        assert_eq!(
            harness.last_published().free_text.as_deref(),
            Some("Flags: 2 red / 1 yellow")
        );
        assert_eq!(controller.state.lock().await.text_source, TextSource::Flag);
    }

    #[tokio::test]
    async fn test_flags_reset_ignored_without_ownership() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;
        let published = harness.publish_count();

        controller.on_flags_changed(&flags(true, 0, 0)).await;

        assert_eq!(harness.publish_count(), published);
        assert_eq!(controller.state.lock().await.text_source, TextSource::None);
    }

    #[tokio::test]
    async fn test_flags_reset_corrects_owned_text() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;
        controller.on_flags_changed(&flags(true, 2, 1)).await;

        controller.on_flags_changed(&flags(true, 0, 0)).await;

        assert_eq!(
            harness.last_published().free_text.as_deref(),
            Some("Flags: 0 red / 0 yellow")
        );
    }

    #[tokio::test]
    async fn test_flags_reset_after_message_takeover_is_ignored() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;
        controller.on_flags_changed(&flags(true, 2, 1)).await;
        controller.on_messages_changed(&game(1, 5), &[message("to the bridge")]).await;

        controller.on_flags_changed(&flags(true, 0, 0)).await;

        assert_eq!(
            harness.last_published().free_text.as_deref(),
            Some("to the bridge")
        );
        assert_eq!(controller.state.lock().await.text_source, TextSource::Message);
    }

    #[tokio::test]
    async fn test_flags_while_hidden_update_state_only() {
        let harness = Harness::default();
        let controller = harness.controller(false);

        controller.on_flags_changed(&flags(true, 1, 0)).await;

        assert_eq!(harness.publish_count(), 0);
        let state = controller.state.lock().await;
        assert_eq!(state.text_source, TextSource::Flag);
        assert_eq!(state.free_text.as_deref(), Some("Flags: 1 red / 0 yellow"));
    }

    #[tokio::test]
    async fn test_messages_cleared_leave_surface_alone() {
        let harness = Harness::default();
        let controller = harness.controller(true);
        controller.on_tick(&game(1, 5), 1_000).await;
        controller.on_flags_changed(&flags(true, 1, 1)).await;
        let published = harness.publish_count();

        controller.on_messages_changed(&game(1, 5), &[]).await;

        assert_eq!(harness.publish_count(), published);
        let state = controller.state.lock().await;
        assert_eq!(state.text_source, TextSource::Flag);
        assert_eq!(state.free_text.as_deref(), Some("Flags: 1 red / 1 yellow"));
    }

    #[tokio::test]
    async fn test_messages_show_latest() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;

        controller
            .on_messages_changed(&game(1, 5), &[message("first"), message("second")])
            .await;

        assert_eq!(harness.last_published().free_text.as_deref(), Some("second"));
        assert_eq!(controller.state.lock().await.text_source, TextSource::Message);
    }

    #[tokio::test]
    async fn test_haptics_suppressed_within_window() {
        let harness = Harness::default();
        harness.advance(100_000);
        let controller = harness.controller(true);

        controller.on_tick(&game(1, 5), 1_000).await;
        assert_eq!(
            harness.last_published().haptic,
            Some(HapticCategory::Break.pattern())
        );

        harness.advance(4_999);
        controller.on_messages_changed(&game(1, 5), &[message("one")]).await;
        assert_eq!(harness.last_published().haptic, None);

        harness.advance(1);
        controller.on_messages_changed(&game(1, 5), &[message("two")]).await;
        assert_eq!(
            harness.last_published().haptic,
            Some(HapticCategory::Message.pattern())
        );
    }

    #[tokio::test]
    async fn test_haptics_disabled_by_preferences() {
        let harness = Harness::default();
        let controller = harness.controller(false);

        controller.on_tick(&game(1, 5), 1_000).await;
        harness.advance(10_000);
        controller.on_flags_changed(&flags(true, 1, 0)).await;

        assert!(harness.published.lock().unwrap().iter().all(|p| p.haptic.is_none()));
        assert_eq!(controller.state.lock().await.haptics.last_vibrate_at(), None);
    }

    #[tokio::test]
    async fn test_acquire_failure_keeps_surface_hidden() {
        let harness = Harness::default();
        let controller =
            harness.controller_with(false, true, false, ElapsedAnchor::UntilRoundEnd);

        controller.on_tick(&game(1, 5), 1_000).await;
        controller.on_messages_changed(&game(1, 5), &[message("lost")]).await;

        assert_eq!(harness.publish_count(), 0);
        assert!(!controller.state.lock().await.surface_active);

        drop(controller);
        assert_eq!(harness.releases.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_binding() {
        let harness = Harness::default();
        let controller =
            harness.controller_with(false, false, true, ElapsedAnchor::UntilRoundEnd);

        controller.on_tick(&game(1, 5), 1_000).await;
        assert_eq!(harness.publish_count(), 1);
        assert!(controller.state.lock().await.surface_active);

        controller.detach().await;
        assert_eq!(harness.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_detach_releases_once() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;

        controller.detach().await;
        controller.detach().await;
        drop(controller);

        assert_eq!(harness.hides.load(Ordering::SeqCst), 1);
        assert_eq!(harness.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_shown_surface() {
        let harness = Harness::default();
        let controller = harness.controller(false);
        controller.on_tick(&game(1, 5), 1_000).await;

        drop(controller);

        assert_eq!(harness.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_ticks_acquire_once() {
        let harness = Harness::default();
        let controller = Arc::new(harness.controller(false));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move { controller.on_tick(&game(1, 5), 1_000 + i).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(harness.acquires.load(Ordering::SeqCst), 1);
        assert_eq!(harness.publish_count(), 8);
    }
}
