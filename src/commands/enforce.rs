use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::integrations;
use crate::platform::Platform;

/// Run the enforce command.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved or the manager's
/// enforcement pass fails.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let platform = Platform::detect();
    let settings = Settings::resolve(global, &platform)?;
    let manager = integrations::manager_for(&platform, &settings);

    tracing::info!(
        "enforcing host integration ({}) in {}",
        manager.kind(),
        settings.integration_dir.display()
    );
    manager.enforce()
}
