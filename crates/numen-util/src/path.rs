//! Path utilities.
//!
//! XDG-style directory lookup for numen plus tilde expansion for paths
//! coming from the config file.

use std::path::{Path, PathBuf};

/// Get the numen configuration directory.
///
/// This follows XDG conventions on Linux/macOS:
/// - `$XDG_CONFIG_HOME/numen` if set
/// - `~/.config/numen` otherwise
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("numen"))
}

/// Get the numen data directory.
///
/// This follows XDG conventions:
/// - `$XDG_DATA_HOME/numen` if set
/// - `~/.local/share/numen` otherwise
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("numen"))
}

/// Get the numen logs directory.
pub fn logs_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return Some(home.join("Library/Logs/numen"));
        }
    }

    if let Some(state_dir) = dirs::state_dir() {
        return Some(state_dir.join("numen/logs"));
    }

    data_dir().map(|p| p.join("logs"))
}

/// Default location for notes.
pub fn default_notes_dir() -> Option<PathBuf> {
    data_dir().map(|p| p.join("notes"))
}

/// Default location for version history.
pub fn default_history_dir() -> Option<PathBuf> {
    data_dir().map(|p| p.join("history"))
}

/// Default location for note templates.
pub fn default_templates_dir() -> Option<PathBuf> {
    data_dir().map(|p| p.join("templates"))
}

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Paths without a tilde are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    if s == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }

    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("numen"));
    }

    #[test]
    fn test_default_notes_dir() {
        let dir = default_notes_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("numen/notes"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~/notes")), home.join("notes"));
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(
            expand_tilde(Path::new("/absolute/notes")),
            PathBuf::from("/absolute/notes")
        );
        assert_eq!(
            expand_tilde(Path::new("relative/notes")),
            PathBuf::from("relative/notes")
        );
    }
}
