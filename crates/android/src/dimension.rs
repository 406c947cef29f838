//! Dimension resource model

use dimens_core::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A named scale factor, e.g. `sw600dp` × 1.5
///
/// Outputs for a spec land in `values-<name>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleSpec {
    name: String,
    factor: f64,
}

impl ScaleSpec {
    /// Create a spec, rejecting names that are not a single path component
    /// and factors that are not finite and positive
    pub fn new(name: impl Into<String>, factor: f64) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(Error::invalid_config_value("scale.name", "must not be empty"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::invalid_config_value(
                "scale.name",
                format!("`{}` must be a single directory qualifier", name),
            ));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::invalid_config_value(
                "scale.factor",
                format!("`{}` for `{}` must be a positive number", factor, name),
            ));
        }

        Ok(Self { name, factor })
    }

    /// Resource qualifier, e.g. `sw600dp`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Multiplier applied to every magnitude
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Output directory name, `values-<name>`
    pub fn dir_name(&self) -> String {
        format!("values-{}", self.name)
    }
}

impl fmt::Display for ScaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.name, self.factor)
    }
}

/// One `<dimen name="..">value</dimen>` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionEntry {
    /// The `name` attribute
    pub name: String,
    /// Raw text content, magnitude followed by unit
    pub value: String,
}

impl DimensionEntry {
    /// Create an entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The dimensions of one source file, keyed by name
///
/// Iteration follows first-declaration order. Inserting a name that is
/// already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionSet {
    entries: Vec<DimensionEntry>,
    index: HashMap<String, usize>,
}

impl DimensionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced
    pub fn insert(&mut self, entry: DimensionEntry) -> Option<DimensionEntry> {
        match self.index.get(&entry.name) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position], entry)),
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&DimensionEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dimension was declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, DimensionEntry> {
        self.entries.iter()
    }
}

impl FromIterator<DimensionEntry> for DimensionSet {
    fn from_iter<I: IntoIterator<Item = DimensionEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DimensionSet {
    type Item = &'a DimensionEntry;
    type IntoIter = std::slice::Iter<'a, DimensionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
