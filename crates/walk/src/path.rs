//! Path helpers for resolving link targets and rendering root-relative paths.

use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Removes `.` and `..` components without touching the filesystem.
///
/// `..` at the filesystem root stays at the root, matching POSIX semantics.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}

/// Joins relative paths onto the current directory and normalizes the result.
pub(crate) fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&env::current_dir()?.join(path)))
    }
}

/// Resolves the traversal root.
///
/// Existing roots are canonicalized. Roots that cannot be canonicalized (most
/// commonly because they do not exist) fall back to their absolute, lexically
/// normalized form so the first scan can report them.
pub(crate) fn resolve_root(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(_) => absolutize(path),
    }
}

/// Resolves the target of the symlink at `link` to an absolute path.
///
/// Relative targets are interpreted against the directory containing the
/// link. Dangling targets and link loops cannot be canonicalized; those
/// resolve to the normalized joined path instead.
pub(crate) fn resolve_link(link: &Path) -> io::Result<PathBuf> {
    let target = fs::read_link(link)?;
    let joined = match link.parent() {
        Some(parent) => parent.join(target),
        None => target,
    };
    Ok(fs::canonicalize(&joined).unwrap_or_else(|_| normalize(&joined)))
}

/// Renders `path` relative to `base`, inserting `..` segments when `path`
/// lies outside `base`. Both inputs must be absolute and normalized.
///
/// Identical paths render as `.`.
pub(crate) fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component<'_>> = path.components().collect();
    let base_components: Vec<Component<'_>> = base.components().collect();
    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(lhs, rhs)| lhs == rhs)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push(Component::ParentDir.as_os_str());
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(Component::CurDir.as_os_str())
    } else {
        relative
    }
}

/// Reports whether `ancestor` contains `path` (inclusive), comparing whole
/// components rather than string prefixes.
pub(crate) fn is_ancestor(ancestor: &Path, path: &Path) -> bool {
    path.starts_with(ancestor)
}
