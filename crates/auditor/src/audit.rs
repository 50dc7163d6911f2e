//! The bundle library audit.

use crate::allowlist::Allowlist;
use crate::classify::classify;
use crate::lister::DependencyLister;
use crate::parsers::parse_dependency_listing;
use crate::report::{AuditReport, FileReport};
use crate::walk::{walk_bundle, BundleEntry};
use macdeploy_common::{BundleLayout, Error, Result};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Per-file violation lines, printed while scanning.
    #[default]
    Text,
    /// Nothing while scanning; the caller serializes the returned report.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!("Invalid output format: {}", s))),
        }
    }
}

/// Audit configuration.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub bundle_dir: PathBuf,
    pub verbose: bool,
    pub allowlist: Allowlist,
    pub format: OutputFormat,
}

impl AuditConfig {
    /// Text output with the system allowlist.
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            verbose: false,
            allowlist: Allowlist::system(),
            format: OutputFormat::Text,
        }
    }
}

/// Checks every file of a bundle for libraries that will not resolve on the target machine.
pub struct Auditor<'a, L: DependencyLister> {
    config: &'a AuditConfig,
    layout: BundleLayout,
    lister: L,
}

impl<'a, L: DependencyLister> Auditor<'a, L> {
    pub fn new(config: &'a AuditConfig, lister: L) -> Self {
        Self {
            layout: BundleLayout::new(&config.bundle_dir),
            config,
            lister,
        }
    }

    /// Run the audit, writing progress and violations to `out`.
    ///
    /// Files are inspected one at a time in traversal order. A violation never
    /// stops the scan; a failing lister does.
    pub async fn run<W: Write + ?Sized>(&self, out: &mut W) -> Result<AuditReport> {
        let root = self.layout.root();
        let text = self.config.format == OutputFormat::Text;
        let verbose = self.config.verbose && text;

        if verbose {
            writeln!(out, "Check libraries in {}", root.display())?;
        }

        if !root.is_dir() {
            return Err(Error::BundleNotFound(root.to_path_buf()));
        }

        info!(
            "Checking {} against {} allowed patterns",
            root.display(),
            self.config.allowlist.len()
        );
        debug!(
            "Allowed patterns: {:?}",
            self.config.allowlist.patterns().collect::<Vec<_>>()
        );

        let mut report = AuditReport::new(root);

        for entry in walk_bundle(root) {
            let path = match entry? {
                BundleEntry::Directory(dir) => {
                    if verbose {
                        writeln!(out, "{}", dir.display())?;
                    }
                    continue;
                }
                BundleEntry::File(path) => path,
            };

            if verbose {
                writeln!(out, " • {}", path.display())?;
            }

            let file_report = self.check_file(path).await?;
            report.files_checked += 1;

            if !file_report.violations.is_empty() {
                if text {
                    file_report.write_text(out)?;
                }
                report.files.push(file_report);
            }
        }

        info!(
            "Checked {} files, {} violations in {} files",
            report.files_checked,
            report.violation_count(),
            report.files.len()
        );

        Ok(report)
    }

    async fn check_file(&self, path: PathBuf) -> Result<FileReport> {
        let listing = self.lister.list(&path).await?;
        let libraries = parse_dependency_listing(&path, &listing)?;

        let mut violations = Vec::new();
        for library in &libraries {
            let classification = classify(library, &path, &self.layout, &self.config.allowlist);
            if classification.is_allowed() {
                debug!("{}: {} allowed ({:?})", path.display(), library, classification);
            } else {
                debug!("{}: {} rejected ({:?})", path.display(), library, classification);
                violations.extend(classification.violation());
            }
        }

        Ok(FileReport { path, violations })
    }
}
