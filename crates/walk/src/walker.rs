use crate::builder::EntryOrder;
use crate::error::WalkError;
use crate::ledger::VisitLedger;
use crate::line::{LineKind, ListingLine};
use crate::path::{is_ancestor, relative_to, resolve_link, resolve_root};
use logging::debug_log;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

/// Depth-first iterator over listing lines.
///
/// Directories are scanned one at a time: each scan reads the whole directory
/// into memory and releases the handle before any entry is visited. Pending
/// scans live on an explicit stack, so deep trees and long symlink chains do
/// not consume call stack.
pub struct Walker {
    root: PathBuf,
    max_visits: u32,
    order: EntryOrder,
    ledger: VisitLedger,
    stack: Vec<DirectoryState>,
    pending: VecDeque<ListingLine>,
    finished: bool,
}

impl Walker {
    pub(crate) fn new(
        requested: PathBuf,
        max_visits: u32,
        order: EntryOrder,
    ) -> Result<Self, WalkError> {
        let root = match resolve_root(&requested) {
            Ok(root) => root,
            Err(error) => return Err(WalkError::resolve_root(requested, error)),
        };
        debug_log!(Scan, 1, "listing tree rooted at {:?}", root);

        let mut walker = Self {
            root,
            max_visits,
            order,
            ledger: VisitLedger::new(),
            stack: Vec::new(),
            pending: VecDeque::new(),
            finished: false,
        };

        walker.push_directory(walker.root.clone(), requested, 0)?;
        Ok(walker)
    }

    /// Returns the resolved traversal root every displayed path is relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configured visit cap.
    #[must_use]
    pub const fn max_visits(&self) -> u32 {
        self.max_visits
    }

    /// Provides read access to the visit counts recorded so far.
    #[must_use]
    pub fn ledger(&self) -> &VisitLedger {
        &self.ledger
    }

    /// Scans `fs_path` and schedules its entries at `depth`.
    ///
    /// Recoverable failures become a diagnostic line naming `shown_path`, the
    /// path as reached from the caller's root, instead of a scan.
    fn push_directory(
        &mut self,
        fs_path: PathBuf,
        shown_path: PathBuf,
        depth: usize,
    ) -> Result<(), WalkError> {
        match DirectoryState::scan(fs_path, shown_path, depth, self.order)? {
            ScanOutcome::Listed(state) => {
                debug_log!(
                    Scan,
                    2,
                    "found {} entries in {:?}",
                    state.remaining(),
                    state.fs_path
                );
                self.stack.push(state);
            }
            ScanOutcome::Failed(kind) => {
                debug_log!(Scan, 1, "scan failed: {:?}", kind);
                self.pending.push_back(ListingLine::new(depth, kind));
            }
        }
        Ok(())
    }

    fn visit(&mut self, entry: VisitedEntry) -> Result<ListingLine, WalkError> {
        let VisitedEntry {
            full_path,
            shown_path,
            file_type,
            depth,
        } = entry;
        let relative = relative_to(&full_path, &self.root);

        if file_type.is_symlink() {
            return self.visit_symlink(full_path, shown_path, relative, depth);
        }

        if file_type.is_dir() {
            self.push_directory(full_path, shown_path, depth + 1)?;
            return Ok(ListingLine::new(depth, LineKind::Directory(relative)));
        }

        Ok(ListingLine::new(depth, LineKind::File(relative)))
    }

    fn visit_symlink(
        &mut self,
        link_path: PathBuf,
        shown_path: PathBuf,
        relative: PathBuf,
        depth: usize,
    ) -> Result<ListingLine, WalkError> {
        let target = match resolve_link(&link_path) {
            Ok(target) => target,
            Err(error) => {
                return recover(shown_path, error, WalkError::read_link)
                    .map(|kind| ListingLine::new(depth, kind));
            }
        };

        let line = ListingLine::new(
            depth,
            LineKind::Symlink {
                link: relative,
                target: relative_to(&target, &self.root),
            },
        );

        if !target.is_dir() {
            debug_log!(Link, 2, "{:?} does not lead to a directory", link_path);
            return Ok(line);
        }

        if is_ancestor(&target, &self.root) {
            debug_log!(
                Link,
                1,
                "{:?} points at ancestor {:?} of the root; not following",
                link_path,
                target
            );
            return Ok(line);
        }

        if self.ledger.try_visit(&target, self.max_visits) {
            debug_log!(
                Visit,
                1,
                "following {:?} into {:?} (visit {} of {})",
                link_path,
                target,
                self.ledger.visits(&target),
                self.max_visits
            );
            // Inside a followed link, diagnostics name the resolved target.
            self.push_directory(target.clone(), target, depth + 1)?;
        } else {
            debug_log!(Visit, 1, "visit cap reached for {:?}", target);
            self.pending.push_back(ListingLine::new(
                depth,
                LineKind::VisitLimit(self.max_visits),
            ));
        }

        Ok(line)
    }
}

impl Iterator for Walker {
    type Item = Result<ListingLine, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }

            let visited = {
                let state = self.stack.last_mut()?;

                if let Some(entry) = state.entries.next() {
                    VisitedEntry {
                        full_path: state.fs_path.join(&entry.name),
                        shown_path: state.shown_path.join(&entry.name),
                        file_type: entry.file_type,
                        depth: state.depth,
                    }
                } else {
                    self.stack.pop();
                    continue;
                }
            };

            match self.visit(visited) {
                Ok(line) => return Some(Ok(line)),
                Err(error) => {
                    self.finished = true;
                    self.stack.clear();
                    self.pending.clear();
                    return Some(Err(error));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Walker {}

/// Outcome of one directory scan attempt.
enum ScanOutcome {
    Listed(DirectoryState),
    Failed(LineKind),
}

/// An entry taken off the top scan, about to be rendered.
struct VisitedEntry {
    full_path: PathBuf,
    shown_path: PathBuf,
    file_type: fs::FileType,
    depth: usize,
}

#[derive(Clone, Debug)]
struct ScannedEntry {
    name: OsString,
    file_type: fs::FileType,
}

#[derive(Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    shown_path: PathBuf,
    entries: vec::IntoIter<ScannedEntry>,
    depth: usize,
}

impl DirectoryState {
    fn scan(
        fs_path: PathBuf,
        shown_path: PathBuf,
        depth: usize,
        order: EntryOrder,
    ) -> Result<ScanOutcome, WalkError> {
        match Self::read_entries(&fs_path) {
            Ok(mut entries) => {
                if order == EntryOrder::Lexicographic {
                    entries.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));
                }
                Ok(ScanOutcome::Listed(Self {
                    fs_path,
                    shown_path,
                    entries: entries.into_iter(),
                    depth,
                }))
            }
            Err(ScanError::Open(error)) => {
                recover(shown_path, error, WalkError::read_dir).map(ScanOutcome::Failed)
            }
            Err(ScanError::Entry(error)) => {
                recover(shown_path, error, WalkError::read_dir_entry).map(ScanOutcome::Failed)
            }
        }
    }

    fn read_entries(fs_path: &Path) -> Result<Vec<ScannedEntry>, ScanError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(fs_path).map_err(ScanError::Open)? {
            let entry = entry.map_err(ScanError::Entry)?;
            let file_type = entry.file_type().map_err(ScanError::Entry)?;
            entries.push(ScannedEntry {
                name: entry.file_name(),
                file_type,
            });
        }
        Ok(entries)
    }

    fn remaining(&self) -> usize {
        self.entries.len()
    }
}

enum ScanError {
    Open(io::Error),
    Entry(io::Error),
}

/// Converts access-denied and not-found failures into diagnostic lines and
/// everything else into a fatal [`WalkError`].
fn recover(
    path: PathBuf,
    error: io::Error,
    fatal: fn(PathBuf, io::Error) -> WalkError,
) -> Result<LineKind, WalkError> {
    match error.kind() {
        io::ErrorKind::PermissionDenied => Ok(LineKind::PermissionDenied(path)),
        io::ErrorKind::NotFound => Ok(LineKind::NotFound(path)),
        _ => Err(fatal(path, error)),
    }
}
