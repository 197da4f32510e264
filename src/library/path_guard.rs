//! Confinement of library-relative paths.
//!
//! Resolution is lexical: each segment is folded component by component
//! relative to the root, so nothing here touches the filesystem. A `..`
//! that would climb above the root fails on the spot, even if later
//! components would walk back inside. Callers that follow a path on disk
//! re-check the canonical target with [`PathGuard::confine`] to catch
//! symlinks.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// A path left the library root or does not name a library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("path escapes the library root")]
pub struct PathTraversalError;

/// Resolves segments against a fixed root and rejects anything outside it.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard for `root`. The root should already be absolute.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: normalize(&root.into()),
        }
    }

    /// The normalized root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fold `segments` below the root.
    ///
    /// Fails on absolute segments and on any `..` that would leave the
    /// root, so the result is always the root or nested under it.
    pub fn resolve<S: AsRef<Path>>(&self, segments: &[S]) -> Result<PathBuf, PathTraversalError> {
        let mut parts = Vec::new();
        for segment in segments {
            fold(&mut parts, segment.as_ref())?;
        }
        Ok(self.join(&parts))
    }

    /// Like [`resolve`](Self::resolve), but each segment must name exactly
    /// one entry, so `["M", "C"]` always lands two levels below the root.
    /// `.`, `a/..` and `a/b` are all rejected.
    pub fn resolve_entry<S: AsRef<Path>>(
        &self,
        segments: &[S],
    ) -> Result<PathBuf, PathTraversalError> {
        let mut parts = Vec::new();
        for segment in segments {
            let mut own = Vec::new();
            fold(&mut own, segment.as_ref())?;
            if own.len() != 1 {
                return Err(PathTraversalError);
            }
            parts.append(&mut own);
        }
        Ok(self.join(&parts))
    }

    /// Check that an already-resolved path is the root or below it.
    ///
    /// Comparison is per component, so `/lib` does not contain `/library`.
    pub fn confine(&self, path: &Path) -> Result<(), PathTraversalError> {
        if path.starts_with(&self.root) {
            Ok(())
        } else {
            Err(PathTraversalError)
        }
    }

    fn join(&self, parts: &[&OsStr]) -> PathBuf {
        parts.iter().fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

/// Fold one segment onto `parts`, the components below the root so far.
fn fold<'a>(parts: &mut Vec<&'a OsStr>, segment: &'a Path) -> Result<(), PathTraversalError> {
    for component in segment.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return Err(PathTraversalError),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop().ok_or(PathTraversalError)?;
            }
            Component::Normal(part) => parts.push(part),
        }
    }
    Ok(())
}

/// Fold `.` and `..` components of a root path without consulting the
/// filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
