//! Android dimension resource scaling
//!
//! Reads `<dimen>` declarations from values resource files and writes scaled
//! copies into `values-<qualifier>` folders, one per configured scale factor.
//!
//! - **Parser**: `<dimen>` children of each document's root element
//! - **Scaler**: magnitude × factor, one decimal digit, unit kept verbatim
//! - **Writer**: atomic replacement of `values-<name>/<file>`
//! - **Task**: source scanning, fan-out per scale, failure isolation
//!
//! # Example
//!
//! ```rust,no_run
//! use dimens_android::{DimensionScaler, ScaleSpec, TaskConfig, TracingReporter};
//! use std::path::PathBuf;
//!
//! let config = TaskConfig::new(
//!     vec![ScaleSpec::new("sw600dp", 1.5)?],
//!     vec![PathBuf::from("src/main/res/values")],
//!     "build/generated/res",
//! )?;
//!
//! let report = DimensionScaler::new(config)?.run(&mut TracingReporter);
//! if !report.is_success() {
//!     eprintln!("{} file(s) failed", report.failure_count());
//! }
//! # Ok::<(), dimens_core::Error>(())
//! ```

#![warn(missing_docs)]

pub mod dimension;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod scaler;
pub mod task;
pub mod unit;
pub mod writer;

pub use dimension::{DimensionEntry, DimensionSet, ScaleSpec};
pub use error::{ParseError, ScalerError};
pub use reporter::{RecordingReporter, ReportEvent, Reporter, TracingReporter};
pub use task::{DimensionScaler, Failure, Plan, PlannedOutput, ScaleReport, TaskConfig, WrittenOutput};
pub use unit::{AlphabeticSuffix, FixedSuffix, UnitSuffix};
pub use writer::ResourceWriter;
