//! Selection State
//!
//! Tracks the active catalog index and swaps the ghost when it changes.

use super::catalog::{Catalog, ObjectStyle, ObjectType};
use super::director::StructureHost;
use super::error::BuildError;
use super::ghost::GhostController;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<usize>,
    object_type: Option<ObjectType>,
    object_style: Option<ObjectStyle>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn object_style(&self) -> Option<ObjectStyle> {
        self.object_style
    }

    /// Select catalog entry `index`.
    ///
    /// Out-of-range indices fail with [`BuildError::OutOfRangeSelection`] and
    /// leave the selection and ghost untouched. Otherwise the old ghost is
    /// deactivated, a ghost for the new entry is activated and the host is
    /// notified.
    pub fn set_selection(
        &mut self,
        index: usize,
        catalog: &Catalog,
        ghosts: &mut GhostController,
        host: &mut dyn StructureHost,
    ) -> Result<(), BuildError> {
        let entry = catalog.entry(index)?;

        ghosts.on_selection_deactivated();
        ghosts.on_selection_activated(index, entry);

        self.current = Some(index);
        self.object_type = Some(entry.object_type);
        self.object_style = Some(entry.object_style);

        host.notify_selection_changed(index, entry.object_type);
        log::info!(
            "selected {} {} ({} left)",
            entry.object_style.name(),
            entry.object_type.name(),
            entry.quantity
        );
        Ok(())
    }

    /// Select the next entry, wrapping to the first.
    pub fn select_next(
        &mut self,
        catalog: &Catalog,
        ghosts: &mut GhostController,
        host: &mut dyn StructureHost,
    ) -> Result<(), BuildError> {
        let len = catalog.len();
        if len == 0 {
            return Err(BuildError::OutOfRangeSelection { index: 0, len });
        }
        let next = self.current.map_or(0, |i| (i + 1) % len);
        self.set_selection(next, catalog, ghosts, host)
    }

    /// Select the previous entry, wrapping to the last.
    pub fn select_previous(
        &mut self,
        catalog: &Catalog,
        ghosts: &mut GhostController,
        host: &mut dyn StructureHost,
    ) -> Result<(), BuildError> {
        let len = catalog.len();
        if len == 0 {
            return Err(BuildError::OutOfRangeSelection { index: 0, len });
        }
        let previous = self.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.set_selection(previous, catalog, ghosts, host)
    }
}
