//! Path utilities for configuration and data storage locations.
//!
//! Follows XDG conventions with home-directory fallbacks: the watched list
//! and log file live under the data directory, the configuration file under
//! the config directory.

use std::path::PathBuf;

/// Returns the data directory for RateMovie storage.
///
/// `$XDG_DATA_HOME/ratemovie` if set, otherwise `~/.local/share/ratemovie`.
/// The watched list (`watched.json`) and log file live here.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("ratemovie");
        }
    }
    home_dir().join(".local/share/ratemovie")
}

/// Returns the default configuration file path.
///
/// `$XDG_CONFIG_HOME/ratemovie/config.toml` if set, otherwise
/// `~/.config/ratemovie/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("ratemovie/config.toml");
        }
    }
    home_dir().join(".config/ratemovie/config.toml")
}

/// Expands a leading tilde to the user's home directory.
///
/// Paths without a tilde prefix are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// The user's home directory, or the current directory as a last resort.
fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
