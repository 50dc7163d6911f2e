//! Deterministic traversal of a bundle directory.

use macdeploy_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// An entry visited while walking a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleEntry {
    /// A directory about to be scanned.
    Directory(PathBuf),
    /// Any non-directory entry, to be handed to the dependency lister.
    File(PathBuf),
}

/// Walk `root` depth-first with entries sorted by name.
///
/// Symlinks are not followed, but a symlink whose target is not a directory
/// is reported as a file like any other non-directory entry.
pub fn walk_bundle(root: &Path) -> impl Iterator<Item = Result<BundleEntry>> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Some(Err(Error::from(err))),
            };
            let path = entry.path().to_path_buf();
            trace!("visit {}", path.display());

            if entry.file_type().is_dir() {
                return Some(Ok(BundleEntry::Directory(path)));
            }
            if entry.path_is_symlink() && path.is_dir() {
                return None;
            }
            Some(Ok(BundleEntry::File(path)))
        })
}
