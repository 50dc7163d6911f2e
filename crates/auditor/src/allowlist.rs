//! Glob patterns for libraries that ship with macOS.

use glob::{MatchOptions, Pattern};
use macdeploy_common::{Error, Result};

/// Libraries assumed present on every target system.
pub const SYSTEM_LIBRARIES: &[&str] = &[
    "/System/*",
    "/usr/lib/libobjc.*.dylib",
    "/usr/lib/libSystem.*.dylib",
    "/usr/lib/libiconv.2.dylib",
    "/usr/lib/libncurses.5.4.dylib",
    "/usr/lib/libc++.1.dylib",
    "/usr/lib/libz.1.dylib",
    "/usr/lib/libbz*.dylib",
    "/usr/lib/libxar.*.dylib",
    "/usr/lib/libcups.*.dylib",
];

// Shell fnmatch semantics: case-sensitive, `*` crosses `/`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Immutable set of glob patterns naming system-provided libraries.
#[derive(Debug, Clone)]
pub struct Allowlist {
    patterns: Vec<Pattern>,
}

impl Allowlist {
    /// The built-in macOS system library list.
    pub fn system() -> Self {
        Self::with_patterns(SYSTEM_LIBRARIES.iter().copied())
            .expect("built-in system library patterns are valid")
    }

    /// Build an allowlist from arbitrary glob patterns.
    pub fn with_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Return a copy with additional patterns appended.
    pub fn extend<I, S>(mut self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for p in extra {
            self.patterns.push(compile(p.as_ref())?);
        }
        Ok(self)
    }

    /// Check if a library path matches any pattern.
    pub fn is_allowed(&self, library: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(library, MATCH_OPTIONS))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::system()
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
