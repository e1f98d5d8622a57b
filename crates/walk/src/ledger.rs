use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Counts how often each resolved symlink target has been entered.
///
/// Keys are always fully resolved target paths, never the paths of the links
/// themselves, so distinct links that reach the same directory share one
/// counter. One ledger lives for exactly one traversal.
#[derive(Clone, Debug, Default)]
pub struct VisitLedger {
    counts: HashMap<PathBuf, u32>,
}

impl VisitLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times `target` has been entered through a symlink.
    #[must_use]
    pub fn visits(&self, target: &Path) -> u32 {
        self.counts.get(target).copied().unwrap_or(0)
    }

    /// Records a visit to `target` if it has been entered fewer than `max`
    /// times, returning whether the visit was granted.
    pub(crate) fn try_visit(&mut self, target: &Path, max: u32) -> bool {
        let count = self.counts.entry(target.to_path_buf()).or_insert(0);
        if *count < max {
            *count += 1;
            true
        } else {
            false
        }
    }

    /// Number of distinct targets the ledger has seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Reports whether no symlink target has been considered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(target, visits)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, u32)> {
        self.counts
            .iter()
            .map(|(target, count)| (target.as_path(), *count))
    }
}
