//! PATH-registration integration for Windows hosts.
//!
//! Unrestricted symlink creation is not universally available on Windows
//! (it needs Developer Mode or admin rights), so this manager exposes the
//! bundled tools by registering the integration directory on the user's
//! PATH (`HKCU\Environment`) instead of creating per-tool filesystem links.
//! The contract is the same as the Unix manager's: idempotent, and only
//! this manager's own PATH entry is ever added or removed.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::IntegrationManager;
use crate::config::Settings;

/// Manages host integration on Windows via user-PATH registration.
#[derive(Debug, Clone)]
pub struct WindowsIntegrationManager {
    integration_dir: PathBuf,
}

impl WindowsIntegrationManager {
    /// Create a manager over the given locations.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            integration_dir: settings.integration_dir.clone(),
        }
    }

    /// Directory whose PATH registration this manager owns.
    #[must_use]
    pub fn integration_dir(&self) -> &Path {
        &self.integration_dir
    }
}

impl IntegrationManager for WindowsIntegrationManager {
    fn kind(&self) -> &'static str {
        "windows"
    }

    fn enforce(&self) -> Result<()> {
        #[cfg(windows)]
        {
            use anyhow::Context as _;
            std::fs::create_dir_all(&self.integration_dir)
                .with_context(|| format!("creating {}", self.integration_dir.display()))?;
            registry::update_user_path(|current| {
                add_path_entry(current, &self.integration_dir.to_string_lossy())
            })
        }
        #[cfg(not(windows))]
        {
            Err(unsupported())
        }
    }

    fn remove(&self) -> Result<()> {
        self.remove_symlinks_only()?;
        #[cfg(windows)]
        {
            use anyhow::Context as _;
            match std::fs::remove_dir(&self.integration_dir) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::DirectoryNotEmpty => {
                    tracing::warn!(
                        "leaving {} in place: directory is not empty",
                        self.integration_dir.display()
                    );
                    Ok(())
                }
                Err(e) => Err(e).with_context(|| {
                    format!("removing integration dir: {}", self.integration_dir.display())
                }),
            }
        }
        #[cfg(not(windows))]
        {
            Ok(())
        }
    }

    fn remove_symlinks_only(&self) -> Result<()> {
        #[cfg(windows)]
        {
            registry::update_user_path(|current| {
                remove_path_entry(current, &self.integration_dir.to_string_lossy())
            })
        }
        #[cfg(not(windows))]
        {
            Err(unsupported())
        }
    }
}

#[cfg(not(windows))]
fn unsupported() -> anyhow::Error {
    crate::error::PlatformError::Unsupported {
        platform: "non-Windows hosts".to_string(),
    }
    .into()
}

/// Append `dir` to a `;`-separated PATH value, or return `None` when it is
/// already present (comparison is case-insensitive, as PATH lookups are).
#[must_use]
pub fn add_path_entry(path_value: &str, dir: &str) -> Option<String> {
    if path_contains(path_value, dir) {
        return None;
    }
    if path_value.trim().is_empty() {
        Some(dir.to_string())
    } else {
        Some(format!("{};{dir}", path_value.trim_end_matches(';')))
    }
}

/// Drop `dir` from a `;`-separated PATH value, or return `None` when it is
/// not present. Every other entry is kept byte-for-byte.
#[must_use]
pub fn remove_path_entry(path_value: &str, dir: &str) -> Option<String> {
    if !path_contains(path_value, dir) {
        return None;
    }
    let kept: Vec<&str> = path_value
        .split(';')
        .filter(|entry| !entry.trim().eq_ignore_ascii_case(dir.trim()))
        .collect();
    Some(kept.join(";"))
}

/// Whether a `;`-separated PATH value already lists `dir`.
#[must_use]
pub fn path_contains(path_value: &str, dir: &str) -> bool {
    path_value
        .split(';')
        .any(|entry| entry.trim().eq_ignore_ascii_case(dir.trim()))
}

#[cfg(windows)]
mod registry {
    use anyhow::{Context as _, Result};
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};

    /// Read `HKCU\Environment\Path`, run `edit` over it, and write the
    /// result back when `edit` returns a new value.
    pub(super) fn update_user_path(edit: impl FnOnce(&str) -> Option<String>) -> Result<()> {
        let env = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags("Environment", KEY_READ | KEY_WRITE)
            .context("opening HKCU\\Environment")?;
        let current: String = env.get_value("Path").unwrap_or_default();
        if let Some(updated) = edit(&current) {
            env.set_value("Path", &updated)
                .context("writing HKCU\\Environment\\Path")?;
        }
        Ok(())
    }
}
