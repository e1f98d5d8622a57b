#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` renders a directory tree as an indented, line-based listing. Real
//! directories are always descended into. Symbolic links are listed together
//! with their resolved targets and followed only while that is guaranteed to
//! terminate: every resolved target may be entered at most `max_visits` times,
//! and targets that contain the traversal root are never entered at all.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the root, the visit cap and the
//!   [`EntryOrder`] used within each directory.
//! - [`Walker`] implements [`Iterator`] and yields [`ListingLine`] values in
//!   pre-order depth-first order using an explicit stack of directory scans.
//! - [`VisitLedger`] counts descents per resolved symlink target. It belongs
//!   to one walker, so independent traversals never influence each other.
//! - [`traverse`] and [`traverse_with`] collect the rendered lines.
//!
//! # Invariants
//!
//! - Displayed paths are relative to the resolved traversal root, even inside
//!   symlinked subtrees outside the root (`../outside/...`).
//! - Ledger keys are resolved target paths, so every link reaching the same
//!   directory draws from the same budget.
//! - A symlink whose target is the root or one of its ancestors is listed but
//!   never expanded, regardless of the visit cap.
//! - Directories that cannot be read because of missing permissions, or that
//!   vanished mid-walk, become `Permission denied: PATH` / `Path not found: PATH`
//!   lines and the walk continues with their siblings.
//!   `PATH` is the caller's root joined with entry names, or the resolved
//!   target once the walk has entered a symlink.
//!
//! # Errors
//!
//! [`WalkError`] is reserved for failures the listing cannot express, such as
//! asking to list a regular file or an I/O error other than access denial or
//! disappearance. The iterator yields no further lines after an error.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("tree");
//! fs::create_dir_all(root.join("dir"))?;
//! fs::write(root.join("dir/file.txt"), b"data")?;
//!
//! let lines = walk::traverse(&root, 3)?;
//! assert_eq!(lines, vec!["dir/", "  dir/file.txt"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod error;
mod ledger;
mod line;
mod path;
mod walker;

pub use builder::{EntryOrder, WalkBuilder};
pub use error::{WalkError, WalkErrorKind};
pub use ledger::VisitLedger;
pub use line::{LineKind, ListingLine};
pub use walker::Walker;

use std::path::PathBuf;

/// Visit cap used when the caller does not choose one.
pub const DEFAULT_MAX_VISITS: u32 = 3;

/// Lists `root` in native directory order and returns the rendered lines.
pub fn traverse<P: Into<PathBuf>>(root: P, max_visits: u32) -> Result<Vec<String>, WalkError> {
    traverse_with(WalkBuilder::new(root).max_visits(max_visits))
}

/// Runs the walk described by `builder` to completion and returns the
/// rendered lines.
pub fn traverse_with(builder: WalkBuilder) -> Result<Vec<String>, WalkError> {
    builder
        .build()?
        .map(|line| line.map(|line| line.to_string()))
        .collect()
}

#[cfg(test)]
mod tests;
