//! Centralized configuration paths.
//!
//! All persisted state lives under:
//! - Unix/macOS: `~/.config/paneldock/`
//! - Windows: `%APPDATA%\paneldock\`

use std::{env, fs, io, path::PathBuf};

const APP_DIR: &str = "paneldock";

/// Base config directory.
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/paneldock`
///   - Else: `~/.config/paneldock`
///
/// Windows:
///   - `%APPDATA%\paneldock`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/paneldock/prefs.json`
pub fn prefs_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("prefs.json"))
}

/// `~/.config/paneldock/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Logs directory, created if missing.
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let dir = logs_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no config directory available")
    })?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_dir_ends_with_app_dir() {
        if let Some(dir) = super::config_dir() {
            assert!(dir.ends_with("paneldock"));
        }
    }

    #[test]
    fn prefs_file_is_inside_config_dir() {
        if let (Some(config), Some(prefs)) = (super::config_dir(), super::prefs_file()) {
            assert!(prefs.starts_with(&config));
            assert!(prefs.to_string_lossy().ends_with("prefs.json"));
        }
    }
}
