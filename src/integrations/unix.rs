//! Symlink-based integration for Unix-like hosts.
//!
//! Two link populations are managed: one symlink per bundled binary in the
//! integration directory (intended to be on the user's PATH), and one per
//! `docker-` prefixed binary in the docker CLI plugin directory. Creation
//! runs directory-first; teardown runs in strict reverse order.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use super::IntegrationManager;
use super::symlink::{LinkChange, ensure_link};
use crate::config::Settings;
use crate::tools::{self, ToolTarget};

/// Manages integration symlinks on Linux and macOS.
#[derive(Debug, Clone)]
pub struct UnixIntegrationManager {
    resources_dir: PathBuf,
    integration_dir: PathBuf,
    plugin_dir: PathBuf,
}

impl UnixIntegrationManager {
    /// Create a manager over the given locations.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            resources_dir: settings.resources_dir.clone(),
            integration_dir: settings.integration_dir.clone(),
            plugin_dir: settings.plugin_dir.clone(),
        }
    }

    /// Apply the symlink primitive to every target concurrently.
    ///
    /// Per-target operations have no data dependency on each other; the
    /// first hard error aborts the pass and propagates. Foreign entries are
    /// skipped inside the primitive and do not abort anything.
    fn ensure_links(targets: &[ToolTarget], desired_present: bool) -> Result<()> {
        targets.par_iter().try_for_each(|target| {
            let change = ensure_link(&target.link, desired_present, Some(&target.source))
                .with_context(|| format!("managing link for {}", target.name))?;
            if !matches!(change, LinkChange::AlreadyCorrect | LinkChange::AlreadyAbsent) {
                tracing::debug!("{}: {change:?}", target.name);
            }
            Ok(())
        })
    }

    fn integration_targets(&self) -> Result<Vec<ToolTarget>> {
        tools::integration_targets(&self.resources_dir, &self.integration_dir)
    }

    fn plugin_targets(&self) -> Result<Vec<ToolTarget>> {
        tools::plugin_targets(&self.resources_dir, &self.integration_dir, &self.plugin_dir)
    }

    /// Remove the integration directory. Absence is success; a directory
    /// the user left their own files in stays behind with a warning.
    fn remove_integration_dir(&self) -> Result<()> {
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
}

impl IntegrationManager for UnixIntegrationManager {
    fn kind(&self) -> &'static str {
        "unix"
    }

    fn enforce(&self) -> Result<()> {
        make_dir(&self.integration_dir)
            .with_context(|| format!("creating {}", self.integration_dir.display()))?;
        Self::ensure_links(&self.integration_targets()?, true)?;

        make_dir(&self.plugin_dir)
            .with_context(|| format!("creating {}", self.plugin_dir.display()))?;
        Self::ensure_links(&self.plugin_targets()?, true)
    }

    fn remove(&self) -> Result<()> {
        self.remove_symlinks_only()?;
        self.remove_integration_dir()
    }

    fn remove_symlinks_only(&self) -> Result<()> {
        Self::ensure_links(&self.plugin_targets()?, false)?;
        Self::ensure_links(&self.integration_targets()?, false)
    }
}

/// `mkdir -p` with mode 0755; "already exists" is success.
fn make_dir(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        std::fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
    }
    #[cfg(not(unix))]
    {
        std::fs::create_dir_all(path)
    }
}
