use anyhow::Result;

use crate::cli::MigrateOpts;
use crate::integrations::legacy;

/// Run the migrate command: one-shot removal of the superseded strategy's
/// symlinks.
///
/// # Errors
///
/// Returns an error if an existing legacy entry cannot be removed.
pub fn run(opts: &MigrateOpts) -> Result<()> {
    tracing::info!("cleaning up legacy symlinks in {}", opts.dir.display());
    legacy::remove_legacy_symlinks(&opts.dir)
}
