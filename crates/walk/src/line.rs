use std::fmt;
use std::path::{Path, PathBuf};

/// Number of spaces rendered per nesting level.
const INDENT_WIDTH: usize = 2;

/// One line of the rendered listing.
///
/// Lines carry the depth at which they were produced together with a
/// [`LineKind`]. The [`Display`](fmt::Display) implementation renders the exact
/// text printed by the command line: entries are indented two spaces per
/// level, while diagnostics always start at column zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingLine {
    pub(crate) depth: usize,
    pub(crate) kind: LineKind,
}

/// What a [`ListingLine`] describes.
///
/// Paths stored in entry variants are relative to the traversal root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// A real directory, rendered with a trailing `/`.
    Directory(PathBuf),
    /// Any entry that is neither a directory nor a symlink.
    File(PathBuf),
    /// A symbolic link and its resolved target.
    Symlink {
        /// Location of the link itself.
        link: PathBuf,
        /// Fully resolved target of the link.
        target: PathBuf,
    },
    /// A symlink target reached its visit cap and was not entered again.
    VisitLimit(u32),
    /// A directory could not be listed because access was denied.
    PermissionDenied(PathBuf),
    /// A path disappeared before it could be listed.
    NotFound(PathBuf),
}

impl ListingLine {
    pub(crate) const fn new(depth: usize, kind: LineKind) -> Self {
        Self { depth, kind }
    }

    /// Reports the nesting depth the line was produced at (root entries are `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns what the line describes.
    #[must_use]
    pub const fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// Consumes the line and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> LineKind {
        self.kind
    }

    /// Returns the root-relative path of the entry, if the line names one.
    ///
    /// For symlinks this is the link's own location. Diagnostics return `None`.
    #[must_use]
    pub fn relative_path(&self) -> Option<&Path> {
        match &self.kind {
            LineKind::Directory(path) | LineKind::File(path) => Some(path),
            LineKind::Symlink { link, .. } => Some(link),
            LineKind::VisitLimit(_) | LineKind::PermissionDenied(_) | LineKind::NotFound(_) => {
                None
            }
        }
    }

    /// Indicates whether the line is a diagnostic rather than an entry.
    #[must_use]
    pub const fn is_diagnostic(&self) -> bool {
        matches!(
            self.kind,
            LineKind::VisitLimit(_) | LineKind::PermissionDenied(_) | LineKind::NotFound(_)
        )
    }
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_diagnostic() {
            write!(f, "{:width$}", "", width = self.depth * INDENT_WIDTH)?;
        }

        match &self.kind {
            LineKind::Directory(path) => write!(f, "{}/", path.display()),
            LineKind::File(path) => write!(f, "{}", path.display()),
            LineKind::Symlink { link, target } => {
                write!(f, "{} -> {}", link.display(), target.display())
            }
            LineKind::VisitLimit(max) => write!(
                f,
                "Maximum visits for symlink ({max}) reached. Skipping further traversal."
            ),
            LineKind::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            LineKind::NotFound(path) => write!(f, "Path not found: {}", path.display()),
        }
    }
}
