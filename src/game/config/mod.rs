//! Config Module
//!
//! Build tuning parameters and the JSON catalog file.

pub mod build_config;

pub use build_config::{BuildConfig, CatalogConfig, ConfigError};
