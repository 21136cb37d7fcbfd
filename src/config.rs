//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive lookups, transcoding and
//! directory scans, plus helpers to load them from disk and environment.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
