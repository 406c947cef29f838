//! Configuration schema definitions
//!
//! Mirrors the layout of `dimens.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// Root directory that receives the generated `values-<name>` folders
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Resource files, or directories whose immediate children are resource files
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Glob patterns matched against directory children to leave out
    #[serde(default)]
    pub exclude: Vec<String>,

    /// How the unit suffix is separated from the magnitude
    #[serde(default)]
    pub unit: UnitKind,

    /// Suffix width used by [`UnitKind::Fixed`]
    #[serde(default = "default_suffix_width")]
    pub suffix_width: usize,

    /// Indentation width of generated documents
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Scale factors, processed in the order they are declared
    #[serde(default, rename = "scale")]
    pub scales: Vec<ScaleEntry>,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            sources: Vec::new(),
            exclude: Vec::new(),
            unit: UnitKind::default(),
            suffix_width: default_suffix_width(),
            indent: default_indent(),
            scales: Vec::new(),
        }
    }
}

/// One `[[scale]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry {
    /// Qualifier used for the output directory name
    pub name: String,
    /// Multiplier applied to every magnitude
    pub factor: f64,
}

/// Unit suffix strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// The last `suffix_width` characters are the unit
    #[default]
    Fixed,
    /// The trailing run of ASCII letters is the unit
    Alphabetic,
}

fn default_destination() -> PathBuf {
    PathBuf::from("build/generated/res")
}

fn default_suffix_width() -> usize {
    2
}

fn default_indent() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_schema_parses() {
        let toml_str = r#"
            destination = "out/res"
            sources = ["res/values", "res/values/dimens.xml"]
            exclude = ["*.bak"]
            unit = "alphabetic"
            indent = 2

            [[scale]]
            name = "sw600dp"
            factor = 1.5

            [[scale]]
            name = "sw720dp"
            factor = 2.0
        "#;

        let schema: ConfigSchema = toml::from_str(toml_str).unwrap();
        assert_eq!(schema.destination, PathBuf::from("out/res"));
        assert_eq!(schema.sources.len(), 2);
        assert_eq!(schema.unit, UnitKind::Alphabetic);
        assert_eq!(schema.suffix_width, 2);
        assert_eq!(schema.indent, 2);
        assert_eq!(
            schema.scales,
            vec![
                ScaleEntry { name: "sw600dp".into(), factor: 1.5 },
                ScaleEntry { name: "sw720dp".into(), factor: 2.0 },
            ]
        );
    }

    #[test]
    fn test_empty_schema_uses_defaults() {
        let schema: ConfigSchema = toml::from_str("").unwrap();
        assert_eq!(schema.destination, PathBuf::from("build/generated/res"));
        assert_eq!(schema.unit, UnitKind::Fixed);
        assert!(schema.scales.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ConfigSchema, _> = toml::from_str("destnation = \"typo\"");
        assert!(result.is_err());
    }
}
