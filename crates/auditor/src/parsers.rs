//! Parsers for dependency lister output.

use macdeploy_common::{Error, Result};
use std::path::Path;

/// Parse `otool -L` output into the list of referenced library paths.
///
/// The first line names the inspected file and is skipped. Every other
/// non-empty line has the form `<library> (compatibility version ..., current version ...)`.
pub fn parse_dependency_listing(path: &Path, output: &str) -> Result<Vec<String>> {
    let mut libraries = Vec::new();

    for line in output.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(paren) = line.find('(') else {
            return Err(Error::UnparsableListing {
                path: path.to_path_buf(),
                line: line.to_string(),
            });
        };

        libraries.push(line[..paren].trim().to_string());
    }

    Ok(libraries)
}
