//! Unit suffix strategies
//!
//! A dimension value is a magnitude followed by a unit (`12.5dp`). The unit
//! is copied to the output verbatim; only the magnitude is scaled. How the two
//! are told apart is pluggable.

use crate::error::ParseError;
use dimens_core::config::UnitKind;
use std::fmt::Debug;
use std::sync::Arc;

/// Splits a raw value into `(magnitude, unit)`
pub trait UnitSuffix: Debug + Send + Sync {
    /// Split `value`, failing when no unit can be found
    fn split<'a>(&self, value: &'a str) -> Result<(&'a str, &'a str), ParseError>;
}

/// The last `width` characters are the unit, whatever they are
///
/// `FixedSuffix::new(2)` matches the classic `dp`/`sp`/`px`/`pt`/`mm`/`in`
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSuffix {
    width: usize,
}

impl FixedSuffix {
    /// Suffix of exactly `width` characters; `0` means unitless
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Suffix width in characters
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for FixedSuffix {
    fn default() -> Self {
        Self::new(2)
    }
}

impl UnitSuffix for FixedSuffix {
    fn split<'a>(&self, value: &'a str) -> Result<(&'a str, &'a str), ParseError> {
        if self.width == 0 {
            return Ok((value, ""));
        }

        // Counted in chars so a multi-byte unit never splits a code point.
        let boundary = value
            .char_indices()
            .rev()
            .nth(self.width - 1)
            .map(|(index, _)| index)
            .ok_or_else(|| ParseError::ValueTooShort {
                value: value.to_string(),
                width: self.width,
            })?;

        Ok(value.split_at(boundary))
    }
}

/// The trailing run of ASCII letters is the unit (`dp`, `sp`, `dip`, `in`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphabeticSuffix;

impl UnitSuffix for AlphabeticSuffix {
    fn split<'a>(&self, value: &'a str) -> Result<(&'a str, &'a str), ParseError> {
        let magnitude = value.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        if magnitude.len() == value.len() {
            return Err(ParseError::MissingUnit {
                value: value.to_string(),
            });
        }
        Ok(value.split_at(magnitude.len()))
    }
}

/// Build the strategy selected in configuration
pub fn from_config(kind: UnitKind, suffix_width: usize) -> Arc<dyn UnitSuffix> {
    match kind {
        UnitKind::Fixed => Arc::new(FixedSuffix::new(suffix_width)),
        UnitKind::Alphabetic => Arc::new(AlphabeticSuffix),
    }
}
