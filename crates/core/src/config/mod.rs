//! Configuration loading and schema definitions
//!
//! The on-disk `dimens.toml` format and its loader.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
