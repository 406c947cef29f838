//! The dimension scaling task
//!
//! Sources are processed in order; for each source the scale specs are
//! processed in configuration order, so when two specs share a name the later
//! one's output is the one left on disk.
//!
//! Failures never stop the run. A source that fails to parse or scale is
//! skipped for every spec and nothing is written for it. A failed write only
//! affects its own (source, spec) pair.

use crate::dimension::{DimensionSet, ScaleSpec};
use crate::error::ScalerError;
use crate::parser;
use crate::reporter::Reporter;
use crate::scaler;
use crate::unit::{FixedSuffix, UnitSuffix};
use crate::writer::ResourceWriter;
use dimens_core::config::ConfigSchema;
use dimens_core::file_scanner::{ScanFailure, SourceScanner};
use dimens_core::{Error, ErrorCode, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable task configuration
#[derive(Debug, Clone)]
pub struct TaskConfig {
    scales: Vec<ScaleSpec>,
    sources: Vec<PathBuf>,
    destination: PathBuf,
    exclude: Vec<String>,
    unit: Arc<dyn UnitSuffix>,
    indent: usize,
}

impl TaskConfig {
    /// Create a configuration with the default two-character unit suffix
    pub fn new(scales: Vec<ScaleSpec>, sources: Vec<PathBuf>, destination: impl Into<PathBuf>) -> Result<Self> {
        let destination = destination.into();
        if destination.as_os_str().is_empty() {
            return Err(Error::invalid_config_value("destination", "must not be empty"));
        }

        Ok(Self {
            scales,
            sources,
            destination,
            exclude: Vec::new(),
            unit: Arc::new(FixedSuffix::default()),
            indent: 4,
        })
    }

    /// Build from a loaded config file; relative paths resolve against `base_dir`
    pub fn from_schema(schema: &ConfigSchema, base_dir: &Path) -> Result<Self> {
        if schema.unit == dimens_core::config::UnitKind::Fixed && schema.suffix_width == 0 {
            return Err(Error::invalid_config_value("suffix_width", "must be at least 1"));
        }

        let scales = schema
            .scales
            .iter()
            .map(|entry| ScaleSpec::new(entry.name.clone(), entry.factor))
            .collect::<Result<Vec<_>>>()?;
        let sources = schema.sources.iter().map(|p| base_dir.join(p)).collect();

        Ok(Self::new(scales, sources, base_dir.join(&schema.destination))?
            .with_exclude(schema.exclude.clone())
            .with_unit(crate::unit::from_config(schema.unit, schema.suffix_width))
            .with_indent(schema.indent))
    }

    /// Glob patterns for directory children to leave out
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Replace the unit suffix strategy
    pub fn with_unit(mut self, unit: Arc<dyn UnitSuffix>) -> Self {
        self.unit = unit;
        self
    }

    /// Indentation width of generated documents
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Scale specs in configuration order
    pub fn scales(&self) -> &[ScaleSpec] {
        &self.scales
    }

    /// Source files and directories
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Root of the generated `values-<name>` folders
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Unit suffix strategy
    pub fn unit(&self) -> &dyn UnitSuffix {
        self.unit.as_ref()
    }

    /// Scale names that appear more than once, in first-seen order
    pub fn duplicate_scale_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for spec in &self.scales {
            if !seen.insert(spec.name()) && !duplicates.contains(&spec.name()) {
                duplicates.push(spec.name());
            }
        }
        duplicates
    }
}

/// A (source, scale) failure
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    /// Source file or configured source path
    pub source: PathBuf,
    /// `None` when the whole source failed
    pub scale: Option<String>,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable description
    pub message: String,
}

impl Failure {
    fn from_scaler(source: &Path, scale: Option<&ScaleSpec>, error: &ScalerError) -> Self {
        Self {
            source: source.to_path_buf(),
            scale: scale.map(|s| s.name().to_string()),
            code: error.code(),
            message: error.to_string(),
        }
    }

    fn from_scan(failure: &ScanFailure) -> Self {
        Self {
            source: failure.path.clone(),
            scale: None,
            code: failure.error.code,
            message: failure.error.message.clone(),
        }
    }
}

/// A generated resource file
#[derive(Debug, Clone, Serialize)]
pub struct WrittenOutput {
    /// Source file
    pub source: PathBuf,
    /// Scale spec name
    pub scale: String,
    /// File written
    pub path: PathBuf,
    /// Dimensions in the file
    pub entries: usize,
}

/// Summary of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScaleReport {
    /// Source files read
    pub files_scanned: usize,
    /// Source files without any dimensions
    pub files_empty: usize,
    /// Dimensions read across all sources
    pub dimensions: usize,
    /// Files written
    pub outputs: Vec<WrittenOutput>,
    /// Failures, in the order they happened
    pub failures: Vec<Failure>,
}

impl ScaleReport {
    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether the run finished without any failure
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// An output the task would write
#[derive(Debug, Clone, Serialize)]
pub struct PlannedOutput {
    /// Source file
    pub source: PathBuf,
    /// Scale spec name
    pub scale: String,
    /// File that would be written
    pub path: PathBuf,
}

/// Inputs and outputs of a run, without reading or writing anything
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    /// Source files found
    pub sources: Vec<PathBuf>,
    /// One entry per (source, scale) pair
    pub outputs: Vec<PlannedOutput>,
    /// Source paths that could not be resolved
    pub failures: Vec<Failure>,
}

/// Scales dimension resources into `values-<name>` folders
#[derive(Debug)]
pub struct DimensionScaler {
    config: TaskConfig,
    scanner: SourceScanner,
    writer: ResourceWriter,
}

impl DimensionScaler {
    /// Create the task; fails if an exclude pattern is not a valid glob
    pub fn new(config: TaskConfig) -> Result<Self> {
        let scanner = SourceScanner::new().exclude(&config.exclude)?;
        let writer = ResourceWriter::new(config.destination.clone(), config.indent);
        Ok(Self {
            config,
            scanner,
            writer,
        })
    }

    /// The configuration this task runs with
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// List sources and the outputs each would produce
    ///
    /// Sources that turn out to have no dimensions still appear here; the
    /// run writes nothing for them.
    pub fn plan(&self) -> Plan {
        let scan = self.scanner.scan(&self.config.sources);
        let mut plan = Plan {
            failures: scan.failures.iter().map(Failure::from_scan).collect(),
            ..Plan::default()
        };

        for source in scan.files {
            match source.file_name() {
                Some(file_name) => {
                    for spec in &self.config.scales {
                        plan.outputs.push(PlannedOutput {
                            source: source.clone(),
                            scale: spec.name().to_string(),
                            path: self.writer.output_path(file_name, spec),
                        });
                    }
                }
                None => plan.failures.push(Failure::from_scaler(
                    &source,
                    None,
                    &ScalerError::InvalidPath(source.clone()),
                )),
            }
            plan.sources.push(source);
        }

        plan
    }

    /// Run the task
    pub fn run(&self, reporter: &mut dyn Reporter) -> ScaleReport {
        let mut report = ScaleReport::default();
        reporter.task_started(&self.config);

        let scan = self.scanner.scan(&self.config.sources);
        for dir in &scan.skipped_dirs {
            reporter.directory_skipped(dir);
        }
        for failure in &scan.failures {
            record(&mut report, reporter, Failure::from_scan(failure));
        }

        for source in &scan.files {
            self.process_source(source, reporter, &mut report);
        }

        reporter.task_finished(&report);
        report
    }

    fn process_source(&self, source: &Path, reporter: &mut dyn Reporter, report: &mut ScaleReport) {
        reporter.source_started(source);
        report.files_scanned += 1;

        let dimensions = match parser::parse_file(source) {
            Ok(set) => set,
            Err(e) => return record(report, reporter, Failure::from_scaler(source, None, &e)),
        };

        for entry in &dimensions {
            reporter.dimension_found(source, entry);
        }
        report.dimensions += dimensions.len();

        if dimensions.is_empty() {
            report.files_empty += 1;
            reporter.source_empty(source);
            return;
        }

        let Some(file_name) = source.file_name() else {
            let e = ScalerError::InvalidPath(source.to_path_buf());
            return record(report, reporter, Failure::from_scaler(source, None, &e));
        };

        // Every spec is scaled before anything is written.
        let scaled = match self.scale_all(source, &dimensions) {
            Ok(scaled) => scaled,
            Err(e) => return record(report, reporter, Failure::from_scaler(source, None, &e)),
        };

        for (spec, set) in self.config.scales.iter().zip(&scaled) {
            match self.writer.write(file_name, set, spec) {
                Ok(path) => {
                    let output = WrittenOutput {
                        source: source.to_path_buf(),
                        scale: spec.name().to_string(),
                        path,
                        entries: set.len(),
                    };
                    reporter.output_written(&output);
                    report.outputs.push(output);
                }
                Err(e) => record(report, reporter, Failure::from_scaler(source, Some(spec), &e)),
            }
        }
    }

    fn scale_all(&self, source: &Path, dimensions: &DimensionSet) -> crate::error::Result<Vec<DimensionSet>> {
        self.config
            .scales
            .iter()
            .map(|spec| scaler::scale_set(source, dimensions, spec, self.config.unit()))
            .collect()
    }
}

fn record(report: &mut ScaleReport, reporter: &mut dyn Reporter, failure: Failure) {
    reporter.failure(&failure);
    report.failures.push(failure);
}
