//! Optional TOML configuration file.
//!
//! Looked up at the platform config directory:
//! - Linux:   `~/.config/number-pick/config.toml`
//! - macOS:   `~/Library/Application Support/number-pick/config.toml`
//! - Windows: `%APPDATA%\number-pick\config.toml`
//!
//! Every key is optional and a missing file is not an error, so the game runs
//! with no setup at all:
//!
//! ```toml
//! theme = "light"
//! log_level = "debug"
//! ```
//!
//! Command-line flags win over anything read here (see `Settings::merge`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::theme::ThemeMode;

/// Directory name under the platform config/data directories.
pub const APP_DIR: &str = "number-pick";

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Contents of the config file. Unknown keys are rejected so typos surface.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub theme: Option<ThemeMode>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`. A file that doesn't exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Default location of the log file.
///
/// Falls back to the current directory when the platform has no data dir.
pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("number-pick.log")
}

/// Final settings after combining the config file with command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: ThemeMode,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Settings {
    /// Combine file values with flag values. `Some` flags win; anything left
    /// unset falls back to the built-in defaults.
    pub fn merge(
        file: FileConfig,
        theme: Option<ThemeMode>,
        log_level: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        Self {
            theme: theme.or(file.theme).unwrap_or_default(),
            log_level: log_level
                .or(file.log_level)
                .unwrap_or_else(|| "info".to_string()),
            log_file: log_file.unwrap_or_else(default_log_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn parses_theme_and_level() {
        let cfg = FileConfig::from_toml("theme = \"light\"\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(cfg.theme, Some(ThemeMode::Light));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = FileConfig::from_toml("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_theme_is_an_error() {
        assert!(FileConfig::from_toml("theme = \"purple\"").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FileConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = \"dark\"\n").unwrap();
        let cfg = FileConfig::load(&path).unwrap();
        assert_eq!(cfg.theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn directory_instead_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn flags_override_file() {
        let file = FileConfig {
            theme: Some(ThemeMode::Light),
            log_level: Some("debug".into()),
        };
        let settings = Settings::merge(
            file,
            Some(ThemeMode::Dark),
            None,
            Some(PathBuf::from("/tmp/x.log")),
        );
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn nothing_set_uses_builtin_defaults() {
        let settings = Settings::merge(FileConfig::default(), None, None, None);
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.log_level, "info");
        assert!(settings.log_file.ends_with("number-pick.log"));
    }
}
