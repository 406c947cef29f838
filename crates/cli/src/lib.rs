//! CLI utilities for the dimension resource tools
//!
//! Terminal output formatting and status messages.

#![warn(missing_docs)]

pub mod output;
