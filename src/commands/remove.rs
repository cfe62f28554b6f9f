use anyhow::Result;

use crate::cli::{GlobalOpts, RemoveOpts};
use crate::config::Settings;
use crate::integrations;
use crate::platform::Platform;

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved or the manager's
/// removal pass fails.
pub fn run(global: &GlobalOpts, opts: &RemoveOpts) -> Result<()> {
    let platform = Platform::detect();
    let settings = Settings::resolve(global, &platform)?;
    let manager = integrations::manager_for(&platform, &settings);

    if opts.symlinks_only {
        tracing::info!("removing managed symlinks ({})", manager.kind());
        manager.remove_symlinks_only()
    } else {
        tracing::info!("removing host integration ({})", manager.kind());
        manager.remove()
    }
}
