//! Progress reporting
//!
//! The task never logs on its own; it tells a [`Reporter`] what happened.
//! [`TracingReporter`] turns that into `tracing` events.

use crate::dimension::DimensionEntry;
use crate::task::{Failure, ScaleReport, TaskConfig, WrittenOutput};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Receives task progress
///
/// Every method has an empty default, so implementations only override what
/// they care about.
pub trait Reporter {
    /// Before any source is scanned
    fn task_started(&mut self, _config: &TaskConfig) {}
    /// A source file is about to be parsed
    fn source_started(&mut self, _path: &Path) {}
    /// One `<dimen>` read from a source
    fn dimension_found(&mut self, _path: &Path, _entry: &DimensionEntry) {}
    /// A source parsed cleanly but declares no dimensions
    fn source_empty(&mut self, _path: &Path) {}
    /// A directory inside a source directory, which is not descended into
    fn directory_skipped(&mut self, _path: &Path) {}
    /// A scaled file was written
    fn output_written(&mut self, _output: &WrittenOutput) {}
    /// A source or (source, scale) pair failed
    fn failure(&mut self, _failure: &Failure) {}
    /// After the last source
    fn task_finished(&mut self, _report: &ScaleReport) {}
}

/// Discards everything
impl Reporter for () {}

/// Emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn task_started(&mut self, config: &TaskConfig) {
        info!(
            scales = config.scales().len(),
            sources = config.sources().len(),
            destination = %config.destination().display(),
            "Scaling dimensions"
        );
        for spec in config.scales() {
            debug!(scale = spec.name(), factor = spec.factor(), "Scale");
        }
        for name in config.duplicate_scale_names() {
            warn!(
                scale = %name,
                "Scale name configured more than once; the last one wins"
            );
        }
    }

    fn source_started(&mut self, path: &Path) {
        info!(path = %path.display(), "Processing");
    }

    fn dimension_found(&mut self, path: &Path, entry: &DimensionEntry) {
        debug!(
            path = %path.display(),
            name = %entry.name,
            value = %entry.value,
            "dimen"
        );
    }

    fn source_empty(&mut self, path: &Path) {
        debug!(path = %path.display(), "No dimensions, nothing generated");
    }

    fn directory_skipped(&mut self, path: &Path) {
        debug!(path = %path.display(), "Nested directory not scanned");
    }

    fn output_written(&mut self, output: &WrittenOutput) {
        info!(
            path = %output.path.display(),
            scale = %output.scale,
            entries = output.entries,
            "Wrote scaled resource"
        );
    }

    fn failure(&mut self, failure: &Failure) {
        warn!(
            path = %failure.source.display(),
            scale = failure.scale.as_deref().unwrap_or("-"),
            code = %failure.code,
            "{}",
            failure.message
        );
    }

    fn task_finished(&mut self, report: &ScaleReport) {
        info!(
            files = report.files_scanned,
            outputs = report.outputs.len(),
            failures = report.failure_count(),
            "Scaling finished"
        );
    }
}

/// One recorded reporter call
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum ReportEvent {
    TaskStarted,
    SourceStarted(PathBuf),
    DimensionFound(PathBuf, DimensionEntry),
    SourceEmpty(PathBuf),
    DirectorySkipped(PathBuf),
    OutputWritten(PathBuf),
    /// Source path and scale name, if the failure was scale-specific
    Failure(PathBuf, Option<String>),
    TaskFinished,
}

/// Records every call, for tests and embedding tools
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Calls received so far
    pub events: Vec<ReportEvent>,
}

impl Reporter for RecordingReporter {
    fn task_started(&mut self, _config: &TaskConfig) {
        self.events.push(ReportEvent::TaskStarted);
    }

    fn source_started(&mut self, path: &Path) {
        self.events.push(ReportEvent::SourceStarted(path.to_path_buf()));
    }

    fn dimension_found(&mut self, path: &Path, entry: &DimensionEntry) {
        self.events
            .push(ReportEvent::DimensionFound(path.to_path_buf(), entry.clone()));
    }

    fn source_empty(&mut self, path: &Path) {
        self.events.push(ReportEvent::SourceEmpty(path.to_path_buf()));
    }

    fn directory_skipped(&mut self, path: &Path) {
        self.events.push(ReportEvent::DirectorySkipped(path.to_path_buf()));
    }

    fn output_written(&mut self, output: &WrittenOutput) {
        self.events.push(ReportEvent::OutputWritten(output.path.clone()));
    }

    fn failure(&mut self, failure: &Failure) {
        self.events.push(ReportEvent::Failure(
            failure.source.clone(),
            failure.scale.clone(),
        ));
    }

    fn task_finished(&mut self, _report: &ScaleReport) {
        self.events.push(ReportEvent::TaskFinished);
    }
}
