//! Per-target link-state report.
//!
//! Observes without changing anything: for every tool target the entry at
//! its link path is classified, and for integration-directory tools the
//! user's PATH is searched for an executable of the same name that would
//! shadow the managed one.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::config::Settings;
use crate::integrations::symlink::{self, LinkState};
use crate::platform::Platform;
use crate::tools::{self, ToolTarget};

/// Observed state of one tool target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub name: String,
    pub link: PathBuf,
    pub source: PathBuf,
    #[serde(flatten)]
    pub state: LinkState,
    /// A different executable of the same name found earlier on PATH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadowed_by: Option<PathBuf>,
}

/// The full report over both link populations.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub integration_dir: PathBuf,
    pub plugin_dir: PathBuf,
    pub tools: Vec<TargetReport>,
    pub plugins: Vec<TargetReport>,
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved or target states cannot
/// be read.
pub fn run(global: &GlobalOpts, opts: &StatusOpts) -> Result<()> {
    let platform = Platform::detect();
    let settings = Settings::resolve(global, &platform)?;
    let report = collect(&settings)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

/// Build the report for the given locations.
///
/// # Errors
///
/// Returns an error if the resources directory or an entry's metadata
/// cannot be read.
pub fn collect(settings: &Settings) -> Result<StatusReport> {
    let tool_targets =
        tools::integration_targets(&settings.resources_dir, &settings.integration_dir)?;
    let plugin_targets = tools::plugin_targets(
        &settings.resources_dir,
        &settings.integration_dir,
        &settings.plugin_dir,
    )?;

    Ok(StatusReport {
        integration_dir: settings.integration_dir.clone(),
        plugin_dir: settings.plugin_dir.clone(),
        tools: tool_targets
            .iter()
            .map(|t| report_target(t, true))
            .collect::<Result<_>>()?,
        plugins: plugin_targets
            .iter()
            .map(|t| report_target(t, false))
            .collect::<Result<_>>()?,
    })
}

fn report_target(target: &ToolTarget, check_shadowing: bool) -> Result<TargetReport> {
    let state = symlink::link_state(&target.link, &target.source)?;
    let shadowed_by = if check_shadowing {
        shadowing_executable(&target.name, &target.link)
    } else {
        None
    };
    Ok(TargetReport {
        name: target.name.clone(),
        link: target.link.clone(),
        source: target.source.clone(),
        state,
        shadowed_by,
    })
}

/// First PATH hit for `name` when it is not the managed link itself.
fn shadowing_executable(name: &str, link: &Path) -> Option<PathBuf> {
    let first = which::which_all(name).ok()?.next()?;
    if dunce::simplified(&first) == dunce::simplified(link) {
        None
    } else {
        Some(first)
    }
}

fn print_text(report: &StatusReport) {
    println!("Integration directory: {}", report.integration_dir.display());
    print_section(&report.tools);
    println!("Plugin directory: {}", report.plugin_dir.display());
    print_section(&report.plugins);
}

fn print_section(targets: &[TargetReport]) {
    if targets.is_empty() {
        println!("  (no tool targets)");
        return;
    }
    for t in targets {
        let state = match &t.state {
            LinkState::Correct => "correct".to_string(),
            LinkState::Missing => "missing".to_string(),
            LinkState::Incorrect { target } => format!("incorrect -> {}", target.display()),
            LinkState::Foreign => "foreign (not a symlink, left alone)".to_string(),
        };
        println!("  {:<20} {state}", t.name);
        if let Some(shadow) = &t.shadowed_by {
            println!("  {:<20} shadowed by {}", "", shadow.display());
        }
    }
}
