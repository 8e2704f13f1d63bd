//! Build errors surfaced to the host/UI. None of them are fatal.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Selection index outside the catalog; the selection is left unchanged.
    #[error("selection index {index} is outside the catalog ({len} entries)")]
    OutOfRangeSelection { index: usize, len: usize },
    /// Commit attempted with nothing left of the entry; nothing was placed.
    #[error("catalog entry {index} is depleted")]
    DepletedCatalogEntry { index: usize },
}
