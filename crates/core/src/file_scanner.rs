//! Source path scanning
//!
//! Expands configured source paths into the resource files to process.
//! Directories are read one level deep only.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scanner that turns source paths into resource files
#[derive(Debug, Default)]
pub struct SourceScanner {
    exclude_patterns: Vec<glob::Pattern>,
}

/// Outcome of a scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files to process, in source order; directory children sorted by name
    pub files: Vec<PathBuf>,
    /// Nested directories that were not descended into
    pub skipped_dirs: Vec<PathBuf>,
    /// Source paths (or directory entries) that could not be read
    pub failures: Vec<ScanFailure>,
}

/// A source path that could not be read
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: Error,
}

impl SourceScanner {
    /// Create a scanner with no exclusions
    ///
    /// Hidden directory children (leading `.`) are always skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude directory children whose file name matches any glob pattern
    pub fn exclude(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    /// Expand the given sources
    ///
    /// Explicit file sources are always kept. Filters only apply to the
    /// children of directory sources.
    pub fn scan(&self, sources: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();

        for source in sources {
            let metadata = match std::fs::metadata(source) {
                Ok(m) => m,
                Err(e) => {
                    let error = match e.kind() {
                        std::io::ErrorKind::NotFound => Error::file_not_found(source),
                        _ => Error::from(e),
                    };
                    result.failures.push(ScanFailure {
                        path: source.clone(),
                        error: error.with_context(format!("Reading source {}", source.display())),
                    });
                    continue;
                }
            };

            if metadata.is_file() {
                result.files.push(source.clone());
            } else {
                self.scan_dir(source, &mut result);
            }
        }

        result
    }

    fn scan_dir(&self, dir: &Path, result: &mut ScanResult) {
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    result.failures.push(ScanFailure {
                        path,
                        error: Error::io(e.to_string()).with_source(e),
                    });
                    continue;
                }
            };

            let path = entry.path();

            if entry.file_type().is_dir() {
                result.skipped_dirs.push(path.to_path_buf());
                continue;
            }

            if is_hidden(path) {
                continue;
            }

            if self.should_exclude(path) {
                continue;
            }

            result.files.push(entry.into_path());
        }
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(file_name) || pattern.matches_path(path))
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
