use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the host integration engine.
#[derive(Parser, Debug)]
#[command(
    name = "toolbridge",
    about = "Expose bundled container tooling on the host",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the bundled-resources directory
    #[arg(long, global = true)]
    pub resources: Option<std::path::PathBuf>,

    /// Override the integration directory (default: ~/.rd/bin)
    #[arg(long = "integration-dir", global = true)]
    pub integration_dir: Option<std::path::PathBuf>,

    /// Override the docker CLI plugin directory (default: ~/.docker/cli-plugins)
    #[arg(long = "plugin-dir", global = true)]
    pub plugin_dir: Option<std::path::PathBuf>,

    /// Read path settings from a TOML file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the integration directory and all managed symlinks
    Enforce,
    /// Remove managed symlinks and, unless told otherwise, the integration directory
    Remove(RemoveOpts),
    /// Clean up symlinks left behind by the superseded integration strategy
    Migrate(MigrateOpts),
    /// Report the state of every managed tool target
    Status(StatusOpts),
    /// Print version information
    Version,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {
    /// Remove symlinks but keep the integration directory in place
    #[arg(long)]
    pub symlinks_only: bool,
}

/// Options for the `migrate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct MigrateOpts {
    /// Directory holding the legacy symlinks
    #[arg(long, default_value = "/usr/local/bin")]
    pub dir: std::path::PathBuf,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StatusOpts {
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}
