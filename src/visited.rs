//! Shared visited-cell set.
//!
//! The only mutable state shared across concurrent cell tasks. The
//! traversal sees a single primitive, [`VisitedSet::claim`]: an atomic
//! insert-if-absent that reports whether the caller made the first
//! claim. No iteration is exposed to the traversal, so no decision can
//! race against a concurrent insert. After a run completes,
//! [`VisitedSet::audit`] snapshots the claimed identifiers for
//! verification and logging.

use dashmap::DashSet;

use crate::grid::CellId;

/// Concurrent set of claimed cell identifiers.
///
/// Append-only for the duration of a run; a fresh run always starts
/// from a fresh set.
///
/// # Examples
///
/// ```rust
/// use orthant_sampler::{grid, CellCoord, VisitedSet};
///
/// let visited = VisitedSet::new();
/// let id = grid::cell_id(&CellCoord::uniform(["x"], 0.4), 2.0, 0.2);
///
/// assert!(visited.claim(id.clone()));   // first claim wins
/// assert!(!visited.claim(id));          // second claim loses
/// assert_eq!(visited.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct VisitedSet {
    cells: DashSet<CellId>,
}

impl VisitedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims `id`, returning `true` iff it was not already
    /// claimed. At most one caller ever observes `true` for a given id.
    #[inline]
    pub fn claim(&self, id: CellId) -> bool {
        self.cells.insert(id)
    }

    /// Number of claimed identifiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no identifier has been claimed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Snapshots all claimed identifiers in sorted order.
    ///
    /// Intended for post-run audits; calling it while a traversal is
    /// still claiming cells observes an arbitrary intermediate state.
    pub fn audit(&self) -> Vec<CellId> {
        let mut ids: Vec<CellId> = self.cells.iter().map(|id| id.key().clone()).collect();
        ids.sort();
        ids
    }
}
