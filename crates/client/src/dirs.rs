//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache and data directories.

use std::path::PathBuf;

const APP_NAME: &str = "caislean";

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/caislean/logs`
/// - Linux: `~/.cache/caislean/logs` (or `$XDG_CACHE_HOME/caislean/logs`)
/// - Windows: `%LOCALAPPDATA%\caislean\logs`
/// - Fallback: `/tmp/caislean/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp").join(APP_NAME))
        .join("logs")
}

/// Get the platform-specific save directory
///
/// - macOS: `~/Library/Application Support/caislean/saves`
/// - Linux: `~/.local/share/caislean/saves` (or `$XDG_DATA_HOME/caislean/saves`)
/// - Windows: `%APPDATA%\caislean\saves`
/// - Fallback: `./saves`
pub fn save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./saves"))
}
