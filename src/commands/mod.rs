//! Top-level subcommand orchestration.
pub mod enforce;
pub mod migrate;
pub mod remove;
pub mod status;
