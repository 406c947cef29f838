//! Core utilities for the dimension resource tools
//!
//! This crate provides shared functionality used by the scaler and its CLI:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based task configuration with defaults
//! - **Source scanning**: Expansion of source paths into resource files
//!
//! # Example
//!
//! ```rust,no_run
//! use dimens_core::{config::Config, file_scanner::SourceScanner};
//!
//! let config = Config::load(None).expect("invalid config");
//! let scan = SourceScanner::new()
//!     .exclude(&config.schema.exclude)
//!     .expect("invalid exclude pattern")
//!     .scan(&config.schema.sources);
//!
//! for file in &scan.files {
//!     println!("{}", file.display());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod file_scanner;

pub use error::{Error, ErrorCode, ErrorReport, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, ScaleEntry, UnitKind};
    pub use crate::error::{exit_codes, Error, ErrorCode, ErrorReport, Result};
    pub use crate::file_scanner::{ScanResult, SourceScanner};
}
