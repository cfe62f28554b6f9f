use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod integrations;
mod logging;
mod platform;
mod tools;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Enforce => commands::enforce::run(&args.global),
        cli::Command::Remove(opts) => commands::remove::run(&args.global, &opts),
        cli::Command::Migrate(opts) => commands::migrate::run(&opts),
        cli::Command::Status(opts) => commands::status::run(&args.global, &opts),
        cli::Command::Version => {
            let version = option_env!("TOOLBRIDGE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("toolbridge {version}");
            Ok(())
        }
    }
}
