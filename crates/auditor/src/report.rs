//! Audit results and their text rendering.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Kind of unresolvable library reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A bundle-relative Frameworks reference that does not exist on disk.
    LibraryNotFound,
    /// A reference that is neither a system library nor bundled.
    NonLocal,
}

/// A library reference that will not resolve on the target machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Resolved path for `LibraryNotFound`, raw reference for `NonLocal`.
    pub library: String,
}

impl Violation {
    pub fn not_found(resolved: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::LibraryNotFound,
            library: resolved.into(),
        }
    }

    pub fn non_local(reference: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::NonLocal,
            library: reference.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::LibraryNotFound => write!(f, "Library not found: {}", self.library),
            ViolationKind::NonLocal => write!(f, "Non local libreary - {}", self.library),
        }
    }
}

/// Violations found in a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

impl FileReport {
    /// Write the file path followed by one `- <message>` line per violation.
    pub fn write_text<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.path.display())?;
        for violation in &self.violations {
            writeln!(out, "- {}", violation)?;
        }
        Ok(())
    }
}

/// Outcome of auditing a whole bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub bundle: PathBuf,
    pub files_checked: usize,
    /// Files with at least one violation, in traversal order.
    pub files: Vec<FileReport>,
}

impl AuditReport {
    pub fn new(bundle: &Path) -> Self {
        Self {
            bundle: bundle.to_path_buf(),
            files_checked: 0,
            files: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.files.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonReport {
            passed: self.passed(),
            violations: self.violation_count(),
            report: self,
        })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    violations: usize,
    #[serde(flatten)]
    report: &'a AuditReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuditReport {
        let mut report = AuditReport::new(Path::new("Player.app"));
        report.files_checked = 3;
        report.files.push(FileReport {
            path: PathBuf::from("Player.app/Contents/MacOS/Player"),
            violations: vec![
                Violation::non_local("/opt/homebrew/lib/libfoo.1.dylib"),
                Violation::not_found("Player.app/Contents/MacOS/../Frameworks/Bar.framework/Bar"),
            ],
        });
        report
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::non_local("/opt/homebrew/lib/libfoo.1.dylib").to_string(),
            "Non local libreary - /opt/homebrew/lib/libfoo.1.dylib"
        );
        assert_eq!(
            Violation::not_found("B.app/Contents/MacOS/../Frameworks/X").to_string(),
            "Library not found: B.app/Contents/MacOS/../Frameworks/X"
        );
    }

    #[test]
    fn test_text_rendering() {
        let mut out = Vec::new();
        sample().files[0].write_text(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Player.app/Contents/MacOS/Player\n\
             - Non local libreary - /opt/homebrew/lib/libfoo.1.dylib\n\
             - Library not found: Player.app/Contents/MacOS/../Frameworks/Bar.framework/Bar\n"
        );
    }

    #[test]
    fn test_json_rendering() {
        let report = sample();
        assert!(!report.passed());
        assert_eq!(report.violation_count(), 2);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["passed"], false);
        assert_eq!(json["violations"], 2);
        assert_eq!(json["files_checked"], 3);
        assert_eq!(json["files"][0]["violations"][0]["kind"], "non-local");
        assert_eq!(json["files"][0]["violations"][1]["kind"], "library-not-found");
    }

    #[test]
    fn test_empty_report_passes() {
        let report = AuditReport::new(Path::new("Player.app"));
        assert!(report.passed());
        assert_eq!(report.violation_count(), 0);
    }
}
