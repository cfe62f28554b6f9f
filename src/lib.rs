//! Host integration engine for bundled container tooling.
//!
//! Exposes a set of bundled command-line executables (container runtime CLI,
//! orchestrator CLI, docker CLI plugins) on the host so that shells and the
//! docker CLI plugin loader can find them, without the user editing PATH by
//! hand. The same contract is enforced on every start and settings change,
//! so every operation here is idempotent and re-derives state from the
//! filesystem rather than caching it.
//!
//! The public API is organised into focused layers:
//!
//! - **[`config`]** — resolve the resources / integration / plugin locations
//! - **[`tools`]** — compute the per-platform tool target list
//! - **[`integrations`]** — the capability contract, its per-host managers,
//!   the symlink primitive, and the legacy-state migrator
//! - **[`commands`]** — top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod integrations;
pub mod logging;
pub mod platform;
pub mod tools;
