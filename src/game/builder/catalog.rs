//! Build Catalog
//!
//! Placeable piece variants and their remaining quantities.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::BuildError;
use crate::world::SurfaceCategory;

/// Kind of building piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Foundation,
    Wall,
    Pillar,
    Roof,
    DoorWay,
    Door,
}

impl ObjectType {
    /// Display name for UI feedback
    pub fn name(self) -> &'static str {
        match self {
            Self::Foundation => "Foundation",
            Self::Wall => "Wall",
            Self::Pillar => "Pillar",
            Self::Roof => "Roof",
            Self::DoorWay => "Doorway",
            Self::Door => "Door",
        }
    }

    /// Surface category a placed piece of this type reports when hit.
    pub fn surface_category(self) -> SurfaceCategory {
        match self {
            Self::Foundation => SurfaceCategory::Foundation,
            Self::Wall => SurfaceCategory::Wall,
            Self::Pillar => SurfaceCategory::Pillar,
            Self::Roof => SurfaceCategory::Roof,
            Self::DoorWay => SurfaceCategory::Doorway,
            Self::Door => SurfaceCategory::Door,
        }
    }
}

/// Material style of a building piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectStyle {
    Hay,
    Wood,
    Stone,
    Steel,
    ReinforcedSteel,
}

impl ObjectStyle {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hay => "Hay",
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Steel => "Steel",
            Self::ReinforcedSteel => "Reinforced Steel",
        }
    }
}

/// Host-side template reference (prefab, mesh asset, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One placeable piece type/style with its templates and remaining budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Template used for the ghost preview
    pub preview: TemplateId,
    /// Template instantiated on commit
    #[serde(rename = "final")]
    pub final_template: TemplateId,
    pub object_type: ObjectType,
    pub object_style: ObjectStyle,
    /// Remaining pieces; unsigned, so never below zero
    pub quantity: u32,
    /// Ghost/piece scale; falls back to the build config's default scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
}

impl CatalogEntry {
    pub fn new(
        preview: impl Into<String>,
        final_template: impl Into<String>,
        object_type: ObjectType,
        object_style: ObjectStyle,
        quantity: u32,
    ) -> Self {
        Self {
            preview: TemplateId::new(preview),
            final_template: TemplateId::new(final_template),
            object_type,
            object_style,
            quantity,
            scale: None,
        }
    }

    /// Set an explicit piece scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Scale to use for this entry, given the configured default.
    pub fn scale_or(&self, default_scale: Vec3) -> Vec3 {
        self.scale.unwrap_or(default_scale)
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity == 0
    }
}

/// Ordered list of placeable entries, addressed by selection index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Look up an entry, failing with [`BuildError::OutOfRangeSelection`].
    pub fn entry(&self, index: usize) -> Result<&CatalogEntry, BuildError> {
        self.entries.get(index).ok_or(BuildError::OutOfRangeSelection {
            index,
            len: self.entries.len(),
        })
    }

    /// Remaining quantity of an entry (0 for unknown indices).
    pub fn remaining(&self, index: usize) -> u32 {
        self.entries.get(index).map_or(0, |entry| entry.quantity)
    }

    /// Take one piece from an entry and return what is left.
    ///
    /// A depleted entry is left untouched and reported as
    /// [`BuildError::DepletedCatalogEntry`].
    pub fn consume(&mut self, index: usize) -> Result<u32, BuildError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(BuildError::OutOfRangeSelection { index, len })?;

        if entry.is_depleted() {
            return Err(BuildError::DepletedCatalogEntry { index });
        }

        entry.quantity -= 1;
        Ok(entry.quantity)
    }
}
