//! Classification of a single library reference.

use crate::allowlist::Allowlist;
use crate::report::Violation;
use macdeploy_common::layout::FRAMEWORKS_PREFIX;
use macdeploy_common::BundleLayout;
use std::path::{Path, PathBuf};

/// How a library reference found in a file resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Matches the system library allowlist.
    System,
    /// A plugin naming itself by its install name below `Contents/PlugIns`.
    PluginSelf,
    /// Same file name as the inspected file.
    SameName,
    /// Bundled under `Contents/Frameworks` and present on disk.
    Bundled(PathBuf),
    /// Bundled under `Contents/Frameworks` but missing on disk.
    Missing(String),
    /// Anything else.
    NonLocal(String),
}

impl Classification {
    pub fn is_allowed(&self) -> bool {
        self.violation().is_none()
    }

    pub fn violation(&self) -> Option<Violation> {
        match self {
            Classification::Missing(resolved) => Some(Violation::not_found(resolved.clone())),
            Classification::NonLocal(reference) => Some(Violation::non_local(reference.clone())),
            _ => None,
        }
    }
}

/// Classify `reference`, a library linked by `file`.
///
/// Rules are tried in order: system allowlist (after `@executable_path`
/// expansion), plugin self-reference, same file name, bundled framework.
pub fn classify(
    reference: &str,
    file: &Path,
    layout: &BundleLayout,
    allowlist: &Allowlist,
) -> Classification {
    let expanded = layout.expand_executable_path(reference);

    if allowlist.is_allowed(&expanded) {
        return Classification::System;
    }

    let plugins_dir = layout.plugins_dir();
    let suffix = file.strip_prefix(&plugins_dir).unwrap_or(file);
    if !suffix.as_os_str().is_empty() && Path::new(reference).ends_with(suffix) {
        return Classification::PluginSelf;
    }

    if let (Some(lib_name), Some(file_name)) = (Path::new(reference).file_name(), file.file_name())
    {
        if lib_name == file_name {
            return Classification::SameName;
        }
    }

    if reference.starts_with(FRAMEWORKS_PREFIX) {
        let resolved = PathBuf::from(&expanded);
        if resolved.exists() {
            return Classification::Bundled(resolved);
        }
        return Classification::Missing(expanded);
    }

    Classification::NonLocal(reference.to_string())
}
