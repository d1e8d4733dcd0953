//! Overlay launcher - hands the overlay target to an external opener
//!
//! The terminal cannot embed the overlay frame, so the target is opened in
//! the system browser (`xdg-open` / `open`) or a configured command.

use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Errors from launching the overlay
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Opener '{0}' not found. Set `opener` in the config file.")]
    OpenerNotFound(String),
    #[error("Failed to start opener: {0}")]
    SpawnFailed(#[from] std::io::Error),
    #[error("Opener '{opener}' failed ({status})")]
    OpenerFailed { opener: String, status: ExitStatus },
    #[error("Nothing to open")]
    NoTarget,
}

/// Default opener for the current platform
pub fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Opens overlay targets outside the terminal
#[derive(Debug, Clone)]
pub struct OverlayLauncher {
    opener: String,
    base: Option<String>,
}

impl Default for OverlayLauncher {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl OverlayLauncher {
    /// Create a launcher; `None` picks the platform opener
    pub fn new(opener: Option<String>, base: Option<String>) -> Self {
        let opener = opener
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| default_opener().to_string());
        let base = base
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        Self { opener, base }
    }

    pub fn opener(&self) -> &str {
        &self.opener
    }

    /// Absolute location for a target
    ///
    /// Targets that already carry a scheme are left alone; anything else is
    /// joined onto the configured base.
    pub fn resolve(&self, target: &str) -> Result<String, LaunchError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(LaunchError::NoTarget);
        }
        if target.contains("://") {
            return Ok(target.to_string());
        }
        Ok(match &self.base {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                target.trim_start_matches('/')
            ),
            None => target.to_string(),
        })
    }

    /// Check if the opener is available on the system
    pub async fn is_available(&self) -> bool {
        if self.opener.starts_with('/') {
            return std::path::Path::new(&self.opener).exists();
        }

        Command::new("which")
            .arg(&self.opener)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Open a target, returning the spawned opener process
    pub async fn open(&self, target: &str) -> Result<Child, LaunchError> {
        let location = self.resolve(target)?;
        info!(opener = %self.opener, %location, "opening overlay");

        let mut cmd = Command::new(&self.opener);
        cmd.arg(&location);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        cmd.spawn().map_err(|e| {
            debug!(error = %e, "opener spawn failed");
            if e.kind() == std::io::ErrorKind::NotFound {
                LaunchError::OpenerNotFound(self.opener.clone())
            } else {
                LaunchError::SpawnFailed(e)
            }
        })
    }

    /// Open a target and wait for the opener to exit
    pub async fn open_and_wait(&self, target: &str) -> Result<(), LaunchError> {
        let mut child = self.open(target).await?;
        let status = child.wait().await?;
        if !status.success() {
            warn!(opener = %self.opener, %status, "opener exited with an error");
            return Err(LaunchError::OpenerFailed {
                opener: self.opener.clone(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opener() {
        let launcher = OverlayLauncher::default();
        assert_eq!(launcher.opener(), default_opener());

        let blank = OverlayLauncher::new(Some("  ".into()), None);
        assert_eq!(blank.opener(), default_opener());
    }

    #[test]
    fn test_resolve_keeps_absolute_targets() {
        let launcher = OverlayLauncher::new(None, Some("http://localhost:8080".into()));
        assert_eq!(
            launcher.resolve("https://webtor.example/x").unwrap(),
            "https://webtor.example/x"
        );
    }

    #[test]
    fn test_resolve_joins_base() {
        let launcher = OverlayLauncher::new(None, Some("http://localhost:8080/".into()));
        assert_eq!(
            launcher.resolve("webtor-overlay.html?src=magnet%3A").unwrap(),
            "http://localhost:8080/webtor-overlay.html?src=magnet%3A"
        );
    }

    #[test]
    fn test_resolve_without_base() {
        let launcher = OverlayLauncher::default();
        assert_eq!(
            launcher.resolve(" webtor-overlay.html?src=x ").unwrap(),
            "webtor-overlay.html?src=x"
        );
        assert!(matches!(launcher.resolve("   "), Err(LaunchError::NoTarget)));
    }

    #[tokio::test]
    async fn test_open_missing_opener() {
        let launcher = OverlayLauncher::new(Some("webtortui-no-such-opener".into()), None);
        assert!(matches!(
            launcher.open("https://example.com").await,
            Err(LaunchError::OpenerNotFound(_))
        ));
        assert!(!launcher.is_available().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_and_wait_reports_exit_status() {
        let ok = OverlayLauncher::new(Some("true".into()), None);
        assert!(ok.open_and_wait("https://example.com").await.is_ok());

        let failing = OverlayLauncher::new(Some("false".into()), None);
        assert!(matches!(
            failing.open_and_wait("https://example.com").await,
            Err(LaunchError::OpenerFailed { .. })
        ));
    }
}
