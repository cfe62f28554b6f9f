//! One-shot cleanup of the superseded integration strategy.
//!
//! An earlier release linked the bundled tools straight into a shared
//! directory under a fixed set of names. That strategy is gone; its
//! artifacts are removed here by name, once, independently of whatever the
//! current manager does. Entries not on the list are never inspected.

use std::path::Path;

use anyhow::{Context as _, Result};
use rayon::prelude::*;

/// Names the superseded strategy linked; must match it literally.
pub const LEGACY_TOOL_NAMES: [&str; 9] = [
    "docker",
    "docker-buildx",
    "docker-compose",
    "helm",
    "kubectl",
    "kuberlr",
    "nerdctl",
    "steve",
    "trivy",
];

/// Remove every legacy entry under `legacy_dir`.
///
/// Per-name removals share no state and run concurrently. A name with no
/// entry is success; conventionally the entries are symlinks, but whatever
/// occupies a listed name is removed.
///
/// # Errors
///
/// Returns an error when an entry exists but cannot be removed (permission
/// denied, device error).
pub fn remove_legacy_symlinks(legacy_dir: &Path) -> Result<()> {
    LEGACY_TOOL_NAMES.par_iter().try_for_each(|name| {
        let path = legacy_dir.join(name);
        match std::fs::symlink_metadata(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("inspecting legacy entry: {}", path.display()))
            }
            Ok(meta) => {
                let removal = if meta.is_dir() && !meta.file_type().is_symlink() {
                    std::fs::remove_dir_all(&path)
                } else {
                    std::fs::remove_file(&path)
                };
                match removal {
                    Ok(()) => {
                        tracing::debug!("removed legacy entry: {}", path.display());
                        Ok(())
                    }
                    // Lost a race with another cleanup; the goal is met.
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(e)
                        .with_context(|| format!("removing legacy entry: {}", path.display())),
                }
            }
        }
    })
}
