//! Alert surface rendered in the process log.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use log::info;

use crate::alerts::{SurfaceError, SurfacePayload, SurfaceSink};

/// [`SurfaceSink`] printing every update of the alert surface through the logger.
#[derive(Default)]
pub struct ConsoleSurface {
    /// Whether the surface is currently shown
    shown: AtomicBool,
}

impl ConsoleSurface {
    /// Create a new hidden [ConsoleSurface].
    pub fn new() -> Self {
        ConsoleSurface::default()
    }

    /// Whether the surface is currently shown.
    #[cfg(test)]
    pub fn is_shown(&self) -> bool {
        self.shown.load(Ordering::SeqCst)
    }
}

impl SurfaceSink for ConsoleSurface {
    fn publish(&self, payload: &SurfacePayload) -> Result<(), SurfaceError> {
        let action = if self.shown.swap(true, Ordering::SeqCst) {
            "update"
        } else {
            "show"
        };

        info!("[surface {}] {}", action, render(payload));
        if let Some(pattern) = payload.haptic {
            info!("[surface {}] vibrate {:?}", action, pattern.durations());
        }

        Ok(())
    }

    fn hide(&self) -> Result<(), SurfaceError> {
        if !self.shown.swap(false, Ordering::SeqCst) {
            return Err(SurfaceError::Rejected("surface is not shown".to_string()));
        }

        info!("[surface hide]");
        Ok(())
    }
}

/// Renders the text fields of a payload on a single line.
fn render(payload: &SurfacePayload) -> String {
    let since = payload
        .elapsed_reference_ms
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|reference| reference.format("%H:%M:%S UTC").to_string());

    [
        payload.title.as_deref(),
        payload.subtext.as_deref(),
        payload.free_text.as_deref(),
        since.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" | ")
}
