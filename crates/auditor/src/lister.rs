//! Dependency listers that report the libraries a binary links against.

use async_trait::async_trait;
use macdeploy_common::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Default dependency lister program.
pub const DEFAULT_OTOOL: &str = "otool";

/// Trait for listing the linked libraries of a file.
#[async_trait]
pub trait DependencyLister: Send + Sync {
    /// Return the raw listing: an identity line followed by one library per line.
    async fn list(&self, path: &Path) -> Result<String>;
}

/// `otool -L` (or a compatible replacement such as `llvm-otool`).
#[derive(Debug, Clone)]
pub struct Otool {
    program: OsString,
}

impl Otool {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }
}

impl Default for Otool {
    fn default() -> Self {
        Self::new(DEFAULT_OTOOL)
    }
}

#[async_trait]
impl DependencyLister for Otool {
    async fn list(&self, path: &Path) -> Result<String> {
        debug!("{} -L {}", self.program_name(), path.display());

        let output = Command::new(&self.program)
            .arg("-L")
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::ListerSpawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::ListerFailed {
                program: self.program_name(),
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
