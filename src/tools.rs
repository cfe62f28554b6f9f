//! Tool target computation.
//!
//! A tool target is a (name, source path, link path) triple describing one
//! exposed executable. Targets are recomputed from the bundled-resources
//! directory listing on every call; nothing is cached between calls, so the
//! managers always act on the current platform and resource layout.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

/// Name prefix that marks a bundled binary as a docker CLI plugin.
pub const CLI_PLUGIN_PREFIX: &str = "docker-";

/// One exposed executable: its logical name, the path of the binary inside
/// the bundled-resources tree, and the path the link for it is placed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolTarget {
    pub name: String,
    pub source: std::path::PathBuf,
    pub link: std::path::PathBuf,
}

/// Targets linking every bundled binary into the integration directory.
///
/// A missing resources directory yields an empty list rather than an error,
/// so removal passes still run after the bundle itself has been deleted.
///
/// # Errors
///
/// Returns an error if the resources directory exists but cannot be read.
pub fn integration_targets(resources_dir: &Path, integration_dir: &Path) -> Result<Vec<ToolTarget>> {
    Ok(tool_names(resources_dir)?
        .into_iter()
        .map(|name| ToolTarget {
            source: resources_dir.join(&name),
            link: integration_dir.join(&name),
            name,
        })
        .collect())
}

/// Targets linking every `docker-` prefixed binary into the docker CLI
/// plugin directory.
///
/// Plugin links point at the corresponding *integration-directory* entry,
/// not at the resources tree, so a plugin resolves through the same path
/// the user's shell uses.
///
/// # Errors
///
/// Returns an error if the resources directory exists but cannot be read.
pub fn plugin_targets(
    resources_dir: &Path,
    integration_dir: &Path,
    plugin_dir: &Path,
) -> Result<Vec<ToolTarget>> {
    Ok(tool_names(resources_dir)?
        .into_iter()
        .filter(|name| name.starts_with(CLI_PLUGIN_PREFIX))
        .map(|name| ToolTarget {
            source: integration_dir.join(&name),
            link: plugin_dir.join(&name),
            name,
        })
        .collect())
}

/// Sorted entry names of the resources directory; empty when it is absent.
fn tool_names(resources_dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(resources_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("reading resources dir: {}", resources_dir.display()));
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| {
            entry
                .ok()
                .map(|e| e.file_name().to_string_lossy().into_owned())
        })
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fake_resources(names: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(tmp.path().join(name), b"#!/bin/sh\n").unwrap();
        }
        tmp
    }

    #[test]
    fn integration_targets_cover_every_bundled_binary() {
        let resources = fake_resources(&["kubectl", "helm", "docker-compose"]);
        let integration_dir = PathBuf::from("/home/u/.rd/bin");

        let targets = integration_targets(resources.path(), &integration_dir).unwrap();
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["docker-compose", "helm", "kubectl"]);
        assert_eq!(targets[1].source, resources.path().join("helm"));
        assert_eq!(targets[1].link, integration_dir.join("helm"));
    }

    #[test]
    fn plugin_targets_are_the_docker_prefixed_subset() {
        let resources = fake_resources(&["kubectl", "docker-compose", "docker-buildx", "helm"]);
        let integration_dir = PathBuf::from("/home/u/.rd/bin");
        let plugin_dir = PathBuf::from("/home/u/.docker/cli-plugins");

        let targets = plugin_targets(resources.path(), &integration_dir, &plugin_dir).unwrap();
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["docker-buildx", "docker-compose"]);
    }

    #[test]
    fn plugin_links_chain_through_the_integration_dir() {
        let resources = fake_resources(&["docker-compose"]);
        let integration_dir = PathBuf::from("/home/u/.rd/bin");
        let plugin_dir = PathBuf::from("/home/u/.docker/cli-plugins");

        let targets = plugin_targets(resources.path(), &integration_dir, &plugin_dir).unwrap();
        assert_eq!(targets[0].source, integration_dir.join("docker-compose"));
        assert_eq!(targets[0].link, plugin_dir.join("docker-compose"));
    }

    #[test]
    fn missing_resources_dir_yields_no_targets() {
        let targets = integration_targets(
            &PathBuf::from("/nonexistent/resources"),
            &PathBuf::from("/home/u/.rd/bin"),
        )
        .unwrap();
        assert!(targets.is_empty());
    }
}
