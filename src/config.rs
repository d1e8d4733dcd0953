//! Configuration management for webtortui
//!
//! Handles config file loading/saving and the data directory.
//! Config is stored at ~/.config/webtortui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::host::ChannelConfig;
use crate::store::FileStorage;
use crate::torrents::OVERLAY_PAGE;

fn default_overlay_page() -> String {
    OVERLAY_PAGE.to_string()
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay page path or URL, receives the `src` query parameter
    #[serde(default = "default_overlay_page")]
    pub overlay_page: String,
    /// Base URL relative overlay targets are joined onto
    pub overlay_base: Option<String>,
    /// Command used to open overlay targets (xdg-open / open when unset)
    pub opener: Option<String>,
    /// Open the overlay target as soon as a torrent starts playing
    pub auto_open: bool,
    /// Override for the data directory holding the torrent list and log
    pub data_dir: Option<PathBuf>,
    /// Built-in channels
    pub channels: Vec<ChannelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay_page: default_overlay_page(),
            overlay_base: None,
            opener: None,
            auto_open: false,
            data_dir: None,
            channels: Vec::new(),
        }
    }
}

impl Config {
    /// Get config file path (~/.config/webtortui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("webtortui").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a file; a missing file gives the defaults
    ///
    /// Unreadable or malformed files are errors so the caller can report
    /// them once logging is up.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load config, falling back to the defaults on error
    ///
    /// The error is handed back alongside the defaults instead of being
    /// logged here, since no subscriber is installed yet at startup.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        let loaded = match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        };
        match loaded {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Directory holding the torrent list and the log file
    ///
    /// `data_dir` wins; otherwise the platform data directory. `None` when
    /// neither can be determined.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        match &self.data_dir {
            Some(dir) => Some(dir.clone()),
            None => FileStorage::default_dir(),
        }
    }

    /// Log file path inside the storage directory
    pub fn log_path(&self) -> Option<PathBuf> {
        self.storage_dir().map(|dir| dir.join("webtortui.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.overlay_page, "webtor-overlay.html");
        assert!(config.opener.is_none());
        assert!(!config.auto_open);
        assert!(config.channels.is_empty());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "overlay_page = [not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn test_load_or_default_hands_back_the_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "auto_open = \"yes\"").unwrap();

        let (config, error) = Config::load_or_default(Some(&path));
        assert_eq!(config, Config::default());
        assert!(error.is_some());

        let (config, error) = Config::load_or_default(Some(&dir.path().join("missing.toml")));
        assert_eq!(config, Config::default());
        assert!(error.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
auto_open = true
opener = "firefox"

[[channels]]
name = "FIP"
url = "https://radio.example/fip.mp3"
radio = true
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.auto_open);
        assert_eq!(config.opener.as_deref(), Some("firefox"));
        assert_eq!(config.overlay_page, "webtor-overlay.html");
        assert_eq!(config.channels.len(), 1);
        assert!(config.channels[0].radio);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            overlay_base: Some("http://localhost:8080".into()),
            data_dir: Some(dir.path().join("data")),
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_storage_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/webtortui-data")),
            ..Config::default()
        };
        assert_eq!(config.storage_dir(), Some(PathBuf::from("/tmp/webtortui-data")));
        assert_eq!(
            config.log_path(),
            Some(PathBuf::from("/tmp/webtortui-data/webtortui.log"))
        );
    }
}
