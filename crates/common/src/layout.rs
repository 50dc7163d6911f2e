//! Conventional layout of a macOS `.app` bundle.

use std::path::{Path, PathBuf};

/// Install-name macro for the directory holding the main executable.
pub const EXECUTABLE_PATH_MACRO: &str = "@executable_path";

/// Prefix of install names pointing into the bundle's `Contents/Frameworks`.
pub const FRAMEWORKS_PREFIX: &str = "@executable_path/../Frameworks/";

/// Paths inside a bundle rooted at `bundle_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
}

impl BundleLayout {
    /// Create a layout for the given bundle directory.
    ///
    /// Trailing separators are dropped so that substituted paths never contain `//`.
    pub fn new(bundle_dir: impl AsRef<Path>) -> Self {
        let raw = bundle_dir.as_ref().to_string_lossy();
        let trimmed = raw.trim_end_matches('/');
        let root = if trimmed.is_empty() && raw.starts_with('/') {
            PathBuf::from("/")
        } else {
            PathBuf::from(trimmed)
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Contents/MacOS`, the directory `@executable_path` stands for.
    pub fn macos_dir(&self) -> PathBuf {
        self.root.join("Contents").join("MacOS")
    }

    /// `Contents/PlugIns`.
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join("Contents").join("PlugIns")
    }

    /// Replace every `@executable_path` in an install name with the bundle's `Contents/MacOS`.
    pub fn expand_executable_path(&self, reference: &str) -> String {
        if !reference.contains(EXECUTABLE_PATH_MACRO) {
            return reference.to_string();
        }
        let macos = self.macos_dir();
        reference.replace(EXECUTABLE_PATH_MACRO, &macos.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_executable_path() {
        let layout = BundleLayout::new("dist/Player.app");
        assert_eq!(
            layout.expand_executable_path("@executable_path/../Frameworks/MyLib.framework/MyLib"),
            "dist/Player.app/Contents/MacOS/../Frameworks/MyLib.framework/MyLib"
        );
        assert_eq!(
            layout.expand_executable_path("/usr/lib/libSystem.B.dylib"),
            "/usr/lib/libSystem.B.dylib"
        );
    }

    #[test]
    fn test_trailing_separator_is_dropped() {
        let layout = BundleLayout::new("dist/Player.app/");
        assert_eq!(layout.root(), Path::new("dist/Player.app"));
        assert_eq!(
            layout.plugins_dir(),
            PathBuf::from("dist/Player.app/Contents/PlugIns")
        );
        assert_eq!(BundleLayout::new("/").root(), Path::new("/"));
    }
}
