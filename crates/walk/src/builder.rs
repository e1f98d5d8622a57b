use crate::DEFAULT_MAX_VISITS;
use crate::error::WalkError;
use crate::walker::Walker;
use std::path::PathBuf;

/// Order in which the entries of a single directory are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryOrder {
    /// Keep the order reported by the operating system.
    ///
    /// This order is filesystem dependent and may change between runs on some
    /// filesystems.
    #[default]
    Native,
    /// Sort entries by file name, byte-wise.
    Lexicographic,
}

/// Configures a listing rooted at a specific path.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    max_visits: u32,
    entry_order: EntryOrder,
}

impl WalkBuilder {
    /// Creates a new builder that will list the provided root path.
    ///
    /// The root does not need to exist; a missing root produces a single
    /// `Path not found` line.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            max_visits: DEFAULT_MAX_VISITS,
            entry_order: EntryOrder::Native,
        }
    }

    /// Caps how many times any single resolved symlink target may be entered.
    ///
    /// Real directories are always listed; the cap only bounds descents made
    /// through symlinks. A cap of `0` lists every link without following any.
    #[must_use]
    pub const fn max_visits(mut self, max_visits: u32) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Selects the order in which directory entries are visited.
    #[must_use]
    pub const fn entry_order(mut self, order: EntryOrder) -> Self {
        self.entry_order = order;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(self.root, self.max_visits, self.entry_order)
    }
}
