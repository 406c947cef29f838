//! Scaled resource output
//!
//! Each (source file, scale) pair becomes `<destination>/values-<name>/<file>`.
//! Documents are rendered in full, written to a temporary file next to the
//! target and then renamed over it, so a failed write never leaves a partial
//! document behind.

use crate::dimension::{DimensionSet, ScaleSpec};
use crate::error::{Result, ScalerError};
use crate::parser::{DIMEN_TAG, NAME_ATTRIBUTE};
use std::ffi::OsStr;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Writes scaled dimension sets under a destination root
#[derive(Debug, Clone)]
pub struct ResourceWriter {
    destination: PathBuf,
    indent: usize,
}

impl ResourceWriter {
    /// Writer rooted at `destination`, indenting children by `indent` spaces
    pub fn new(destination: impl Into<PathBuf>, indent: usize) -> Self {
        Self {
            destination: destination.into(),
            indent,
        }
    }

    /// Where the output for `file_name` under `spec` goes
    pub fn output_path(&self, file_name: &OsStr, spec: &ScaleSpec) -> PathBuf {
        self.destination.join(spec.dir_name()).join(file_name)
    }

    /// Render a `<resources>` document
    pub fn render(&self, dimensions: &DimensionSet) -> String {
        let pad = " ".repeat(self.indent);
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");

        for entry in dimensions {
            let _ = writeln!(
                out,
                "{pad}<{DIMEN_TAG} {NAME_ATTRIBUTE}=\"{}\">{}</{DIMEN_TAG}>",
                escape(&entry.name, true),
                escape(&entry.value, false),
            );
        }

        out.push_str("</resources>\n");
        out
    }

    /// Write `dimensions` for `spec`, replacing any existing file
    pub fn write(&self, file_name: &OsStr, dimensions: &DimensionSet, spec: &ScaleSpec) -> Result<PathBuf> {
        let dir = self.destination.join(spec.dir_name());
        std::fs::create_dir_all(&dir).map_err(|source| ScalerError::Write {
            path: dir.clone(),
            source,
        })?;

        let target = dir.join(file_name);
        let document = self.render(dimensions);
        let write_err = |source| ScalerError::Write {
            path: target.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        temp.write_all(document.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(&target).map_err(|e| write_err(e.error))?;

        Ok(target)
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
