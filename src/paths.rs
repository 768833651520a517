//! Path utilities for determining data storage locations.
//!
//! Data lives in `~/.ican-checklist/` unless the `ICAN_CHECKLIST_HOME`
//! environment variable points somewhere else.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const HOME_ENV_VAR: &str = "ICAN_CHECKLIST_HOME";

/// The base directory name under the user's home directory.
const DATA_DIR_NAME: &str = ".ican-checklist";

/// The database filename.
pub const DATABASE_FILENAME: &str = "checklist.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the data directory.
///
/// Returns the value of `ICAN_CHECKLIST_HOME` if set and non-empty, otherwise
/// `~/.ican-checklist/`, or `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(DATA_DIR_NAME)),
    }
}

/// Default database path inside a data directory.
#[must_use]
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILENAME)
}

/// Config file path inside a data directory.
#[must_use]
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets an environment variable for the duration of a test.
    struct EnvGuard {
        key: &'static str,
        original: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let original = std::env::var_os(key);
            std::env::set_var(key, value);
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_env_override() {
        let _guard = EnvGuard::set(HOME_ENV_VAR, "/tmp/ican-test-home");
        assert_eq!(data_dir(), Some(PathBuf::from("/tmp/ican-test-home")));
    }

    #[test]
    #[serial]
    fn test_data_dir_ignores_empty_override() {
        let _guard = EnvGuard::set(HOME_ENV_VAR, "");
        if let Some(dir) = data_dir() {
            assert!(dir.ends_with(DATA_DIR_NAME));
        }
    }

    #[test]
    fn test_file_paths() {
        let base = Path::new("/data");
        assert_eq!(db_path(base), PathBuf::from("/data/checklist.sqlite3"));
        assert_eq!(config_path(base), PathBuf::from("/data/config.yaml"));
    }
}
