//! The ordered, user-reorderable image collection.
//!
//! Full-resolution and preview data live together in one [`ImageEntry`]
//! record, so every mutation is a single logical transition: a reader
//! can never observe the full and preview sides out of alignment.

use tracing::debug;

use crate::error::{PreconditionViolation, Result};
use crate::models::ImageEntry;

/// Ordered collection of admitted images.
///
/// Indices handed to the mutating operations come from an external
/// reordering surface (drag handles, context menus) and always refer to
/// the collection's current order. Out-of-range indices are contract
/// breaches, not user errors, and are rejected as
/// [`PreconditionViolation`]s.
#[derive(Debug, Default, Clone)]
pub struct ImageSet {
    entries: Vec<ImageEntry>,
}

impl ImageSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from one ingested batch.
    pub fn from_entries(entries: Vec<ImageEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    /// Append an entry at the end.
    pub fn push(&mut self, entry: ImageEntry) {
        self.entries.push(entry);
    }

    /// Current identifiers in collection order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.identifier.as_str()).collect()
    }

    /// Move the element at `from` so it ends up at `to`.
    ///
    /// `to == None` means the drag ended without a valid drop target and
    /// the whole operation is a silent no-op. Both indices are validated
    /// against the length before removal.
    pub fn reorder(&mut self, from: usize, to: Option<usize>) -> Result<()> {
        let Some(to) = to else {
            debug!(from, "reorder dropped without target, ignoring");
            return Ok(());
        };

        let len = self.entries.len();
        if from >= len {
            return Err(PreconditionViolation::IndexOutOfRange { index: from, len }.into());
        }
        if to >= len {
            return Err(PreconditionViolation::MoveTargetOutOfRange { index: to, len }.into());
        }

        let entry = self.entries.remove(from);
        debug!(from, to, identifier = %entry.identifier, "reordering image");
        self.entries.insert(to, entry);
        Ok(())
    }

    /// Move the element at `index` to the front.
    pub fn move_to_start(&mut self, index: usize) -> Result<()> {
        self.reorder(index, Some(0))
    }

    /// Move the element at `index` to the back.
    ///
    /// The target is the last position of the current length, computed
    /// before removal.
    pub fn move_to_end(&mut self, index: usize) -> Result<()> {
        let len = self.entries.len();
        if len == 0 {
            return Err(PreconditionViolation::IndexOutOfRange { index, len }.into());
        }
        self.reorder(index, Some(len - 1))
    }

    /// Remove the element at `index`.
    pub fn delete(&mut self, index: usize) -> Result<ImageEntry> {
        let len = self.entries.len();
        if index >= len {
            return Err(PreconditionViolation::IndexOutOfRange { index, len }.into());
        }
        let entry = self.entries.remove(index);
        debug!(index, identifier = %entry.identifier, "deleted image");
        Ok(entry)
    }

    /// Point-in-time copy of the current order, consumed by one
    /// conversion pass. Later mutations of the set do not affect a
    /// conversion already in flight.
    pub fn snapshot(&self) -> Vec<ImageEntry> {
        self.entries.clone()
    }
}
