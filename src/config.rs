//! Path settings for the integration engine.
//!
//! The three locations the managers operate on are always passed in
//! explicitly; nothing below this module reads ambient global state. The
//! resolution order is CLI flags > environment > optional TOML settings
//! file > platform defaults.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::cli::GlobalOpts;
use crate::error::ConfigError;
use crate::platform::Platform;

/// Resolved locations the integration managers operate on.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Read-only directory holding the bundled tool binaries.
    pub resources_dir: PathBuf,
    /// Writable directory the symlinks are placed in; intended to be on PATH.
    pub integration_dir: PathBuf,
    /// Directory the docker CLI discovers plugins in.
    pub plugin_dir: PathBuf,
}

/// Optional on-disk overrides, all keys optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    resources_dir: Option<PathBuf>,
    integration_dir: Option<PathBuf>,
    plugin_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from CLI options, environment, settings file and
    /// platform defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or an
    /// explicitly named settings file cannot be read or parsed.
    pub fn resolve(global: &GlobalOpts, platform: &Platform) -> Result<Self> {
        let home = home_dir()?;
        Self::resolve_with_home(global, platform, &home)
    }

    /// Resolution against an explicit home directory (injectable for tests).
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named settings file cannot be read
    /// or parsed. A missing *default* settings file is not an error.
    pub fn resolve_with_home(
        global: &GlobalOpts,
        platform: &Platform,
        home: &Path,
    ) -> Result<Self> {
        let file = match &global.config {
            Some(path) => load_settings_file(path)?,
            None => {
                let default = home.join(".config").join("toolbridge").join("settings.toml");
                if default.is_file() {
                    load_settings_file(&default)?
                } else {
                    SettingsFile::default()
                }
            }
        };

        let resources_dir = global
            .resources
            .clone()
            .or_else(|| std::env::var_os("TOOLBRIDGE_RESOURCES").map(PathBuf::from))
            .or(file.resources_dir)
            .unwrap_or_else(|| default_resources_dir(platform));

        let integration_dir = global
            .integration_dir
            .clone()
            .or(file.integration_dir)
            .unwrap_or_else(|| home.join(".rd").join("bin"));

        let plugin_dir = global
            .plugin_dir
            .clone()
            .or(file.plugin_dir)
            .unwrap_or_else(|| home.join(".docker").join("cli-plugins"));

        Ok(Self {
            resources_dir,
            integration_dir,
            plugin_dir,
        })
    }
}

/// The user's home directory, from `HOME` (or `USERPROFILE` on Windows).
///
/// # Errors
///
/// Returns [`ConfigError::NoHome`] when neither variable is set.
pub fn home_dir() -> Result<PathBuf> {
    let home = if cfg!(target_os = "windows") {
        std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"))
    } else {
        std::env::var_os("HOME")
    };
    home.map(PathBuf::from).ok_or_else(|| {
        ConfigError::NoHome("HOME (or USERPROFILE) environment variable is not set".to_string())
            .into()
    })
}

fn load_settings_file(path: &Path) -> Result<SettingsFile> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file = toml::from_str(&text).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(file)
}

/// Default bundled-resources location: `resources/<os>/bin` next to the
/// installation root (one level above the executable), falling back to the
/// current directory for development runs.
fn default_resources_dir(platform: &Platform) -> PathBuf {
    let tail = Path::new("resources")
        .join(platform.os.to_string())
        .join("bin");
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        let candidate = parent.join("..").join(&tail);
        if candidate.is_dir() {
            return candidate;
        }
    }
    tail
}
