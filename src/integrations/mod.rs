//! The host integration capability contract and its per-host managers.
//!
//! Platform-specific behavior is modeled as one trait with exactly one
//! implementation selected per host at construction time via [`manager_for`];
//! business logic never branches on the OS at runtime.

pub mod legacy;
pub mod symlink;
pub mod unix;
pub mod windows;

use anyhow::Result;

use crate::config::Settings;
use crate::platform::{Os, Platform};

/// The capability contract every per-host manager satisfies.
///
/// All three operations are idempotent and re-derive state from the
/// filesystem on every call, so repeated invocation with unchanged external
/// state produces no further changes. Overlapping calls from multiple
/// callers are not serialized here; callers own that discipline.
pub trait IntegrationManager: Send + Sync {
    /// Short mechanism name for logging (`"unix"`, `"windows"`).
    fn kind(&self) -> &'static str;

    /// Ensure the integration directory exists and every managed link is
    /// present and points correctly.
    ///
    /// # Errors
    ///
    /// Returns an error when a filesystem call fails for reasons other than
    /// "already in desired state"; the current pass is aborted and a retried
    /// call is safe.
    fn enforce(&self) -> Result<()>;

    /// Undo everything [`enforce`](Self::enforce) would create, in reverse
    /// order. A no-op when nothing was ever enforced.
    ///
    /// # Errors
    ///
    /// Returns an error when a filesystem call fails for reasons other than
    /// "already in desired state". A non-empty integration directory is a
    /// soft failure, not an error.
    fn remove(&self) -> Result<()>;

    /// Like [`remove`](Self::remove), but the integration directory is kept
    /// in place even if it becomes empty. Used while another collaborator
    /// still depends on the directory's existence during a strategy
    /// transition.
    ///
    /// # Errors
    ///
    /// Same conditions as [`remove`](Self::remove).
    fn remove_symlinks_only(&self) -> Result<()>;
}

/// Select the manager implementation for the given host.
#[must_use]
pub fn manager_for(platform: &Platform, settings: &Settings) -> Box<dyn IntegrationManager> {
    match platform.os {
        Os::Windows => Box::new(windows::WindowsIntegrationManager::new(settings)),
        // Every other host shares the symlink mechanism.
        _ => Box::new(unix::UnixIntegrationManager::new(settings)),
    }
}
