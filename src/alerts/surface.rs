//! Capabilities supplied by the host to the alert controller.
//!
//! The controller never talks to the platform directly. It goes through these
//! traits so that the host decides how the alert surface is rendered, how the
//! process is kept alive, where preferences come from and what time it is.

use mockall::automock;
use thiserror::Error;

use crate::alerts::haptics::HapticPattern;

/// Content handed to the [`SurfaceSink`] on every publish.
///
/// A payload is built fresh for each publish and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfacePayload {
    /// Main line, e.g. the current round
    pub title: Option<String>,
    /// Secondary line, e.g. the reason of a pause
    pub subtext: Option<String>,
    /// Free text owned by either the flags or the messages
    pub free_text: Option<String>,
    /// Instant the elapsed time display counts from or towards, in Unix milliseconds
    pub elapsed_reference_ms: Option<i64>,
    /// Vibration to play with this update, `None` to stay silent
    pub haptic: Option<HapticPattern>,
}

/// Errors raised by a [`SurfaceSink`].
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The platform refused to show or update the surface
    #[error("surface update rejected: {0}")]
    Rejected(String),
}

/// Errors raised by a [`KeepAlive`] binding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeepAliveError {
    /// `acquire` called while the binding is held
    #[error("keep-alive binding already held")]
    AlreadyHeld,
    /// `release` called while the binding is not held
    #[error("keep-alive binding not held")]
    NotHeld,
}

/// Persistent, user visible alert surface.
#[automock]
pub trait SurfaceSink {
    /// Shows the surface or updates it in place if already shown.
    fn publish(&self, payload: &SurfacePayload) -> Result<(), SurfaceError>;
    /// Removes the surface.
    fn hide(&self) -> Result<(), SurfaceError>;
}

/// Handle keeping the hosting process alive while the surface is shown.
#[automock]
pub trait KeepAlive {
    /// Takes the binding, only valid while not held.
    fn acquire(&self) -> Result<(), KeepAliveError>;
    /// Gives the binding back, only valid while held.
    fn release(&self) -> Result<(), KeepAliveError>;
}

/// Read-only user preferences.
#[automock]
pub trait PreferenceStore {
    /// Returns the boolean stored under `key`, or `default` if unset or unreadable.
    fn get_bool(&self, key: &str, default: bool) -> bool;
}

/// Wall clock used for haptic rate limiting.
#[automock]
pub trait Clock {
    /// Current time in Unix milliseconds.
    fn now_millis(&self) -> i64;
}

/// Boxed capabilities the controller is built from.
pub struct Capabilities {
    /// Where the alert surface is rendered
    pub surface: Box<dyn SurfaceSink + Send + Sync>,
    /// Binding held while the surface is shown
    pub keep_alive: Box<dyn KeepAlive + Send + Sync>,
    /// User preferences enabling each haptic category
    pub preferences: Box<dyn PreferenceStore + Send + Sync>,
    /// Time source
    pub clock: Box<dyn Clock + Send + Sync>,
}
