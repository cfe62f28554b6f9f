// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed resources tree and a fluent builder
// so each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use toolbridge_cli::config::Settings;

/// Default tool set written into the resources directory by
/// [`IntegrationTestContext::new`]. Mirrors a typical bundled-tools layout:
/// a mix of plain CLI tools and `docker-` prefixed CLI plugins.
pub const DEFAULT_TOOLS: [&str; 5] = [
    "docker-buildx",
    "docker-compose",
    "helm",
    "kubectl",
    "nerdctl",
];

/// An isolated test environment backed by a [`tempfile::TempDir`].
///
/// Holds a resources directory populated with fake tool binaries plus the
/// integration and plugin directory paths the managers operate on. The
/// directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory containing resources and managed directories.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context whose resources directory holds [`DEFAULT_TOOLS`].
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let resources = root.path().join("resources");
        std::fs::create_dir_all(&resources).expect("create resources dir");
        for name in DEFAULT_TOOLS {
            write_fake_tool(&resources, name);
        }
        Self { root }
    }

    /// Create a context with an empty (but existing) resources directory.
    pub fn empty() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("resources")).expect("create resources dir");
        Self { root }
    }

    /// Path to the resources directory.
    pub fn resources_dir(&self) -> PathBuf {
        self.root.path().join("resources")
    }

    /// Path to the managed integration directory.
    pub fn integration_dir(&self) -> PathBuf {
        self.root.path().join("home").join(".rd").join("bin")
    }

    /// Path to the managed docker CLI plugin directory.
    pub fn plugin_dir(&self) -> PathBuf {
        self.root
            .path()
            .join("home")
            .join(".docker")
            .join("cli-plugins")
    }

    /// Settings pointing every location into this context.
    pub fn settings(&self) -> Settings {
        Settings {
            resources_dir: self.resources_dir(),
            integration_dir: self.integration_dir(),
            plugin_dir: self.plugin_dir(),
        }
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with the default tool set.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Add an extra fake tool binary to the resources directory.
    pub fn with_tool(self, name: &str) -> Self {
        write_fake_tool(&self.ctx.resources_dir(), name);
        self
    }

    /// Pre-create the integration directory with a regular file in it,
    /// simulating a user-owned entry at a managed path.
    pub fn with_foreign_entry(self, name: &str, contents: &str) -> Self {
        let dir = self.ctx.integration_dir();
        std::fs::create_dir_all(&dir).expect("create integration dir");
        std::fs::write(dir.join(name), contents).expect("write foreign entry");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_fake_tool(resources: &Path, name: &str) {
    std::fs::write(resources.join(name), b"#!/bin/sh\nexit 0\n").expect("write fake tool");
}
