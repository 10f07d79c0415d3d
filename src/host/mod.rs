//! Host side implementations of the alert controller capabilities.
//!
//! # Modules
//!
//! - `surface` - [`ConsoleSurface`], an alert surface rendered in the logs
//! - `keep_alive` - [`ProcessKeepAlive`], the binding keeping the notifier running
//! - `preferences` - [`FilePreferences`], user preferences read from a JSON file
//!
//! The wall clock, [`SystemClock`], lives here too.

mod keep_alive;
mod preferences;
mod surface;

use chrono::Utc;

use crate::alerts::Clock;

pub use crate::host::keep_alive::ProcessKeepAlive;
pub use crate::host::preferences::FilePreferences;
pub use crate::host::surface::ConsoleSurface;

/// [`Clock`] reading the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
