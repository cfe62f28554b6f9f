//! The managed-symlink primitive.
//!
//! A managed path holds a resource in one of three states: absent, a
//! symlink (owned by this subsystem and freely rewritten), or a foreign
//! entry (anything that is not a symlink). Foreign entries are never
//! mutated or deleted; they are reported and skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::error::LinkError;

/// Observed state of a managed link path relative to its desired source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LinkState {
    /// No entry exists at the link path.
    Missing,
    /// A symlink exists and resolves to the desired source.
    Correct,
    /// A symlink exists but points elsewhere.
    Incorrect {
        /// Where the existing symlink currently points.
        target: PathBuf,
    },
    /// A non-symlink entry occupies the link path; it is not ours to touch.
    Foreign,
}

/// Outcome of a single [`ensure_link`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    Created,
    Replaced,
    AlreadyCorrect,
    Removed,
    AlreadyAbsent,
    /// A foreign entry was left untouched; the batch continues.
    SkippedForeign,
}

/// Make the entry at `link` match the desired state.
///
/// When `desired_present` is true, `source` must be given; an existing
/// symlink is rewritten if it points elsewhere. When false, an existing
/// symlink is removed. In both directions a non-symlink entry at `link`
/// is left untouched with a warning.
///
/// # Errors
///
/// Returns an error when a filesystem call fails for reasons other than
/// "already in the desired state" (permission denied, disk full, device
/// error). Such errors should abort the caller's current pass.
pub fn ensure_link(link: &Path, desired_present: bool, source: Option<&Path>) -> Result<LinkChange> {
    if desired_present {
        let source = source
            .ok_or_else(|| LinkError::MissingSource(link.display().to_string()))?;
        ensure_present(link, source)
    } else {
        ensure_absent(link)
    }
}

fn ensure_present(link: &Path, source: &Path) -> Result<LinkChange> {
    match std::fs::symlink_metadata(link) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            create_symlink(source, link)?;
            Ok(LinkChange::Created)
        }
        Err(e) => Err(LinkError::Io {
            path: link.display().to_string(),
            source: e,
        }
        .into()),
        Ok(meta) if meta.file_type().is_symlink() => {
            let existing = std::fs::read_link(link)
                .with_context(|| format!("reading link target: {}", link.display()))?;
            if paths_equal(&existing, source) {
                return Ok(LinkChange::AlreadyCorrect);
            }
            remove_symlink(link)?;
            create_symlink(source, link)?;
            Ok(LinkChange::Replaced)
        }
        Ok(_) => {
            tracing::warn!(
                "not touching {}: entry exists and is not a symlink",
                link.display()
            );
            Ok(LinkChange::SkippedForeign)
        }
    }
}

fn ensure_absent(link: &Path) -> Result<LinkChange> {
    match std::fs::symlink_metadata(link) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LinkChange::AlreadyAbsent),
        Err(e) => Err(LinkError::Io {
            path: link.display().to_string(),
            source: e,
        }
        .into()),
        Ok(meta) if meta.file_type().is_symlink() => {
            remove_symlink(link)?;
            Ok(LinkChange::Removed)
        }
        Ok(_) => {
            tracing::warn!(
                "not removing {}: entry exists and is not a symlink",
                link.display()
            );
            Ok(LinkChange::SkippedForeign)
        }
    }
}

/// Observe the state of the entry at `link` relative to `source` without
/// changing anything.
///
/// # Errors
///
/// Returns an error if the entry's metadata or link target cannot be read
/// for reasons other than the entry being absent.
pub fn link_state(link: &Path, source: &Path) -> Result<LinkState> {
    match std::fs::symlink_metadata(link) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LinkState::Missing),
        Err(e) => Err(LinkError::Io {
            path: link.display().to_string(),
            source: e,
        }
        .into()),
        Ok(meta) if meta.file_type().is_symlink() => {
            let existing = std::fs::read_link(link)
                .with_context(|| format!("reading link target: {}", link.display()))?;
            if paths_equal(&existing, source) {
                Ok(LinkState::Correct)
            } else {
                Ok(LinkState::Incorrect { target: existing })
            }
        }
        Ok(_) => Ok(LinkState::Foreign),
    }
}

/// Compare two paths for equality, normalising the `\\?\` prefix that
/// Windows `read_link` prepends to extended-length paths.
fn paths_equal(a: &Path, b: &Path) -> bool {
    dunce::simplified(a) == dunce::simplified(b)
}

/// Create a symlink at `link` pointing to `source`.
///
/// On Windows, if symlink creation fails with "Access is denied" (OS error
/// 5, raised when neither Developer Mode nor admin rights are available),
/// falls back to a hard link — the targets here are always regular files.
fn create_symlink(source: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link).with_context(|| {
            format!("creating symlink {} -> {}", link.display(), source.display())
        })?;
    }

    #[cfg(windows)]
    {
        match std::os::windows::fs::symlink_file(source, link) {
            Ok(()) => {}
            Err(e) if e.raw_os_error() == Some(5) => {
                std::fs::hard_link(source, link).with_context(|| {
                    format!(
                        "Cannot create symlink or hard link for '{}'.\n\
                         Enable Developer Mode (Settings > System > For developers) \
                         or run as Administrator.",
                        link.display()
                    )
                })?;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("creating symlink {} -> {}", link.display(), source.display())
                });
            }
        }
    }

    Ok(())
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir` (not
/// `remove_file`); `symlink_metadata().is_dir()` returns `false` for
/// symlinks, so the raw `FILE_ATTRIBUTE_DIRECTORY` flag is checked instead.
fn remove_symlink(path: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
            .with_context(|| format!("removing directory link: {}", path.display()))?;
    } else {
        std::fs::remove_file(path).with_context(|| format!("removing link: {}", path.display()))?;
    }
    Ok(())
}

fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn paths_equal_plain() {
        assert!(paths_equal(
            &PathBuf::from("/home/u/.rd/bin/kubectl"),
            &PathBuf::from("/home/u/.rd/bin/kubectl"),
        ));
        assert!(!paths_equal(
            &PathBuf::from("/home/u/.rd/bin/kubectl"),
            &PathBuf::from("/home/u/.rd/bin/helm"),
        ));
    }

    #[test]
    fn ensure_present_requires_a_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ensure_link(&tmp.path().join("kubectl"), true, None).unwrap_err();
        assert!(err.to_string().contains("Missing source path"));
    }

    #[test]
    fn absent_link_stays_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let change = ensure_link(&tmp.path().join("kubectl"), false, None).unwrap();
        assert_eq!(change, LinkChange::AlreadyAbsent);
    }

    #[test]
    fn state_of_missing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let state = link_state(&tmp.path().join("kubectl"), &tmp.path().join("src")).unwrap();
        assert_eq!(state, LinkState::Missing);
    }

    #[test]
    fn state_of_foreign_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let link = tmp.path().join("kubectl");
        std::fs::write(&link, b"not a symlink").unwrap();
        let state = link_state(&link, &tmp.path().join("src")).unwrap();
        assert_eq!(state, LinkState::Foreign);
    }

    #[test]
    fn foreign_entry_survives_both_directions() {
        let tmp = tempfile::tempdir().unwrap();
        let link = tmp.path().join("kubectl");
        let source = tmp.path().join("src");
        std::fs::write(&link, b"these contents should be kept").unwrap();
        std::fs::write(&source, b"binary").unwrap();

        let change = ensure_link(&link, true, Some(&source)).unwrap();
        assert_eq!(change, LinkChange::SkippedForeign);
        let change = ensure_link(&link, false, None).unwrap();
        assert_eq!(change, LinkChange::SkippedForeign);

        assert_eq!(
            std::fs::read(&link).unwrap(),
            b"these contents should be kept"
        );
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        #[test]
        fn creates_link_when_absent() {
            let tmp = tempfile::tempdir().unwrap();
            let source = tmp.path().join("src");
            let link = tmp.path().join("kubectl");
            std::fs::write(&source, b"binary").unwrap();

            let change = ensure_link(&link, true, Some(&source)).unwrap();
            assert_eq!(change, LinkChange::Created);
            assert_eq!(std::fs::read_link(&link).unwrap(), source);
        }

        #[test]
        fn correct_link_is_left_alone() {
            let tmp = tempfile::tempdir().unwrap();
            let source = tmp.path().join("src");
            let link = tmp.path().join("kubectl");
            std::fs::write(&source, b"binary").unwrap();
            std::os::unix::fs::symlink(&source, &link).unwrap();

            let change = ensure_link(&link, true, Some(&source)).unwrap();
            assert_eq!(change, LinkChange::AlreadyCorrect);
        }

        #[test]
        fn stale_link_is_rewritten() {
            let tmp = tempfile::tempdir().unwrap();
            let stale = tmp.path().join("old-src");
            let source = tmp.path().join("src");
            let link = tmp.path().join("kubectl");
            std::fs::write(&stale, b"old").unwrap();
            std::fs::write(&source, b"binary").unwrap();
            std::os::unix::fs::symlink(&stale, &link).unwrap();

            let change = ensure_link(&link, true, Some(&source)).unwrap();
            assert_eq!(change, LinkChange::Replaced);
            assert_eq!(std::fs::read_link(&link).unwrap(), source);
        }

        #[test]
        fn dangling_link_is_rewritten() {
            let tmp = tempfile::tempdir().unwrap();
            let source = tmp.path().join("src");
            let link = tmp.path().join("kubectl");
            std::fs::write(&source, b"binary").unwrap();
            std::os::unix::fs::symlink(tmp.path().join("gone"), &link).unwrap();

            let change = ensure_link(&link, true, Some(&source)).unwrap();
            assert_eq!(change, LinkChange::Replaced);
        }

        #[test]
        fn any_symlink_is_removed_on_teardown() {
            let tmp = tempfile::tempdir().unwrap();
            let elsewhere = tmp.path().join("elsewhere");
            let link = tmp.path().join("kubectl");
            std::fs::write(&elsewhere, b"x").unwrap();
            std::os::unix::fs::symlink(&elsewhere, &link).unwrap();

            let change = ensure_link(&link, false, None).unwrap();
            assert_eq!(change, LinkChange::Removed);
            assert!(std::fs::symlink_metadata(&link).is_err());
        }

        #[test]
        fn state_tracks_link_target() {
            let tmp = tempfile::tempdir().unwrap();
            let source = tmp.path().join("src");
            let other = tmp.path().join("other");
            let link = tmp.path().join("kubectl");
            std::fs::write(&source, b"x").unwrap();
            std::fs::write(&other, b"y").unwrap();
            std::os::unix::fs::symlink(&source, &link).unwrap();

            assert_eq!(link_state(&link, &source).unwrap(), LinkState::Correct);
            assert_eq!(
                link_state(&link, &other).unwrap(),
                LinkState::Incorrect { target: source }
            );
        }
    }
}
