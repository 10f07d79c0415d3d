//! Helpers locating the files of the data directory.

use std::path::PathBuf;

/// Name of the user preferences file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Path of a file stored in the data directory.
///
/// # Examples
///
/// ```
/// let path = data_file("./ctfws-data", PREFERENCES_FILE);
/// assert_eq!(path, PathBuf::from("./ctfws-data/preferences.json"));
/// ```
pub fn data_file(data_dir: &str, file_name: &str) -> PathBuf {
    [data_dir, file_name].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_file() {
        let path = data_file("/var/lib/ctfws", PREFERENCES_FILE);
        assert_eq!(path, PathBuf::from("/var/lib/ctfws").join("preferences.json"));
    }

    #[test]
    fn test_data_file_relative_dir() {
        let path = data_file(".", "feed.jsonl");
        assert_eq!(path, PathBuf::from(".").join("feed.jsonl"));
    }

    #[test]
    fn test_data_file_with_spaces() {
        let path = data_file("/home/my folder", "my prefs.json");
        assert!(path.ends_with("my prefs.json"));
        assert!(path.starts_with("/home/my folder"));
    }
}
