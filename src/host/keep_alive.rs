//! Keep-alive binding of the notifier process.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::alerts::{KeepAlive, KeepAliveError};

/// [`KeepAlive`] tracking whether the process must stay up for the alert surface.
#[derive(Default)]
pub struct ProcessKeepAlive {
    /// Whether the binding is taken
    held: AtomicBool,
}

impl ProcessKeepAlive {
    /// Create a new released [ProcessKeepAlive].
    pub fn new() -> Self {
        ProcessKeepAlive::default()
    }

    /// Whether the binding is currently taken.
    #[cfg(test)]
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

impl KeepAlive for ProcessKeepAlive {
    fn acquire(&self) -> Result<(), KeepAliveError> {
        if self.held.swap(true, Ordering::SeqCst) {
            return Err(KeepAliveError::AlreadyHeld);
        }

        debug!("keep-alive binding acquired");
        Ok(())
    }

    fn release(&self) -> Result<(), KeepAliveError> {
        if !self.held.swap(false, Ordering::SeqCst) {
            return Err(KeepAliveError::NotHeld);
        }

        debug!("keep-alive binding released");
        Ok(())
    }
}
