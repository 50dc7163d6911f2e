//! Common error types for macdeploy.

use std::path::PathBuf;
use thiserror::Error;

/// Common error type for macdeploy operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("can't open input directory: {} (No such directory)", .0.display())]
    BundleNotFound(PathBuf),

    #[error("Invalid allowlist pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to walk bundle: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to run {program}: {source}")]
    ListerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed on {} ({status}): {stderr}", .path.display())]
    ListerFailed {
        program: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Unparsable dependency listing for {}: {line:?}", .path.display())]
    UnparsableListing { path: PathBuf, line: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error stems from invalid user input rather than a failure during the scan.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::BundleNotFound(_) | Error::Pattern { .. } | Error::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_not_found_message() {
        let err = Error::BundleNotFound(PathBuf::from("build/Missing.app"));
        assert_eq!(
            err.to_string(),
            "can't open input directory: build/Missing.app (No such directory)"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_lister_failure_is_not_config() {
        let err = Error::ListerFailed {
            program: "otool".to_string(),
            path: PathBuf::from("App.app/Contents/Info.plist"),
            status: "exit status: 1".to_string(),
            stderr: "is not an object file".to_string(),
        };
        assert!(!err.is_config());
        assert!(err.to_string().contains("App.app/Contents/Info.plist"));
    }
}
