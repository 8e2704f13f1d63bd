//! Build Configuration
//!
//! Placement tuning and the catalog of placeable pieces, loaded from JSON.
//! `Default` returns the values the build system was tuned with.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::builder::rules::MAX_SLOPE_DEGREES;
use crate::game::builder::snap::SNAP_RELEASE_DISTANCE;
use crate::game::builder::Catalog;

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no entries")]
    EmptyCatalog,
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Placement tuning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Steepest accepted surface, degrees from world up (inclusive)
    pub max_slope_degrees: f32,
    /// Cursor distance from the snapped position that releases a snap
    pub snap_release_distance: f32,
    /// Height pieces sit at above their anchor (half the piece height)
    pub vertical_offset: f32,
    /// Ghost/piece scale for entries that do not set one
    pub default_scale: Vec3,
    /// Catalog index selected on start-up
    pub initial_selection: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_slope_degrees: MAX_SLOPE_DEGREES,
            snap_release_distance: SNAP_RELEASE_DISTANCE,
            vertical_offset: 0.25,
            default_scale: Vec3::new(2.0, 0.5, 2.0),
            initial_selection: 0,
        }
    }
}

impl BuildConfig {
    /// Reject values the build system cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=90.0).contains(&self.max_slope_degrees) {
            return Err(invalid(
                "max_slope_degrees",
                format!("{} is outside 0..=90", self.max_slope_degrees),
            ));
        }
        if !(self.snap_release_distance > 0.0 && self.snap_release_distance.is_finite()) {
            return Err(invalid(
                "snap_release_distance",
                format!("{} must be a positive distance", self.snap_release_distance),
            ));
        }
        if !self.vertical_offset.is_finite() {
            return Err(invalid("vertical_offset", "must be finite".to_string()));
        }
        validate_scale("default_scale", self.default_scale)
    }
}

/// Contents of a catalog file.
///
/// ```json
/// {
///   "build": { "max_slope_degrees": 45.0 },
///   "catalog": [
///     { "preview": "foundation_wood_ghost", "final": "foundation_wood",
///       "object_type": "FOUNDATION", "object_style": "WOOD", "quantity": 10 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub build: BuildConfig,
    pub catalog: Catalog,
}

impl CatalogConfig {
    /// Parse and validate a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "loaded {} catalog entries from {}",
            config.catalog.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build.validate()?;

        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        if self.build.initial_selection >= self.catalog.len() {
            return Err(invalid(
                "initial_selection",
                format!(
                    "{} is outside the catalog ({} entries)",
                    self.build.initial_selection,
                    self.catalog.len()
                ),
            ));
        }

        for (i, entry) in self.catalog.iter().enumerate() {
            if let Some(scale) = entry.scale {
                validate_scale(&format!("catalog[{i}].scale"), scale)?;
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}

fn validate_scale(field: &str, scale: Vec3) -> Result<(), ConfigError> {
    if !scale.is_finite() || scale.min_element() <= 0.0 {
        return Err(invalid(field, format!("{scale} must be finite and positive")));
    }
    Ok(())
}
