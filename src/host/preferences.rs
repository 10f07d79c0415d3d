//! User preferences persisted on disk.
//!
//! This module provides the [`FilePreferences`] store, read from a JSON object
//! mapping preference keys to booleans:
//!
//! ```json
//! { "vibrate_break": true, "vibrate_flag": false, "vibrate_message": true }
//! ```

use std::{collections::HashMap, path::Path};

use log::{error, info, warn};
use tokio::fs;

use crate::alerts::PreferenceStore;

/// Read-only [`PreferenceStore`] loaded from a JSON file.
///
/// If loading fails (file missing or corrupted), the store is empty and every
/// lookup falls back to its default, which keeps the haptics off.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let preferences = FilePreferences::load(Path::new("data/preferences.json")).await;
/// let vibrate = preferences.get_bool("vibrate_flag", false);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct FilePreferences {
    /// Loaded preferences
    values: HashMap<String, bool>,
}

impl FilePreferences {
    /// Loads the preferences from disk.
    ///
    /// # Error Handling
    ///
    /// - If the file doesn't exist: logs a warning and returns an empty store
    /// - If deserialization fails: logs an error and returns an empty store
    pub async fn load(path: &Path) -> Self {
        let Ok(serialized) = fs::read_to_string(path).await else {
            warn!("no preferences found at {}, haptics disabled", path.display());
            return FilePreferences::default();
        };

        let Ok(values) = serde_json::from_str::<HashMap<String, bool>>(&serialized) else {
            error!(
                "failed to deserialize preferences at {}, haptics disabled",
                path.display()
            );
            return FilePreferences::default();
        };

        info!("loaded preferences {:?}", values);

        FilePreferences { values }
    }
}

impl PreferenceStore for FilePreferences {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values.get(key).copied().unwrap_or(default)
    }
}
