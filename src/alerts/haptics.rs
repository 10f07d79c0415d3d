//! Haptic feedback categories and their rate limiting.
//!
//! Every category has its own vibration pattern and its own user preference,
//! but a single suppression window is shared by all of them: once any pattern
//! actually fired, every request inside the window stays silent.

use std::fmt;

use log::debug;

use crate::alerts::surface::PreferenceStore;

/// Default suppression window, in milliseconds.
pub const DEFAULT_SUPPRESS_WINDOW_MS: u64 = 5000;

/// Vibration pattern as alternating pause and buzz durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticPattern(&'static [u64]);

impl HapticPattern {
    /// Pause and buzz durations, starting with a pause.
    pub fn durations(&self) -> &'static [u64] {
        self.0
    }
}

/// Morse `J` (`.---`)
const PATTERN_BREAK: HapticPattern = HapticPattern(&[0, 100, 100, 300, 100, 300, 100, 300]);
/// Morse `F` (`..-.`)
const PATTERN_FLAG: HapticPattern = HapticPattern(&[0, 100, 100, 100, 100, 300, 100, 100]);
/// Morse `M` (`--`)
const PATTERN_MESSAGE: HapticPattern = HapticPattern(&[0, 300, 100, 300]);

/// Source of a haptic request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticCategory {
    /// Round transitions
    Break,
    /// Captured flag count changes
    Flag,
    /// New message arrival
    Message,
}

impl HapticCategory {
    /// Preference key enabling this category.
    pub fn preference_key(&self) -> &'static str {
        match self {
            HapticCategory::Break => "vibrate_break",
            HapticCategory::Flag => "vibrate_flag",
            HapticCategory::Message => "vibrate_message",
        }
    }

    /// Pattern played for this category.
    pub fn pattern(&self) -> HapticPattern {
        match self {
            HapticCategory::Break => PATTERN_BREAK,
            HapticCategory::Flag => PATTERN_FLAG,
            HapticCategory::Message => PATTERN_MESSAGE,
        }
    }
}

impl fmt::Display for HapticCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Shared suppression window across all haptic categories.
#[derive(Debug)]
pub struct HapticLimiter {
    /// Width of the suppression window, in milliseconds
    window_ms: i64,
    /// Last time a pattern actually fired, in Unix milliseconds
    last_vibrate_at: Option<i64>,
}

impl HapticLimiter {
    /// Create a new [HapticLimiter] that never fired.
    pub fn new(window_ms: u64) -> Self {
        HapticLimiter {
            window_ms: i64::try_from(window_ms).unwrap_or(i64::MAX),
            last_vibrate_at: None,
        }
    }

    /// Decides which pattern, if any, goes with the next surface update.
    ///
    /// Returns `None` when the request falls inside the suppression window or when
    /// the category is disabled. Missing preferences count as disabled. The window
    /// only restarts when a pattern is returned.
    pub fn request(
        &mut self,
        category: HapticCategory,
        now_ms: i64,
        preferences: &dyn PreferenceStore,
    ) -> Option<HapticPattern> {
        if let Some(last) = self.last_vibrate_at
            && now_ms.saturating_sub(last) < self.window_ms
        {
            debug!("suppress {} haptic, last one fired at {}", category, last);
            return None;
        }

        if !preferences.get_bool(category.preference_key(), false) {
            debug!("{} haptic disabled", category);
            return None;
        }

        self.last_vibrate_at = Some(now_ms);
        Some(category.pattern())
    }

    /// Last time a pattern fired, if ever.
    #[cfg(test)]
    pub fn last_vibrate_at(&self) -> Option<i64> {
        self.last_vibrate_at
    }
}
