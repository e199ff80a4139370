// src/watch/path_utils.rs

//! Lexical path helpers shared by the scanner and the filter.
//!
//! None of these touch the filesystem: symlinks are not resolved, so a path
//! compares equal to an exclude entry exactly when both spell the same
//! location after cleaning.

use std::path::{Component, Path, PathBuf};

/// Lexically normalise a path.
///
/// - drops `.` components and duplicate separators,
/// - folds `name/..` pairs,
/// - keeps leading `..` on relative paths, drops `..` directly under the root,
/// - returns `.` for a path that cleans down to nothing.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Extension of the final path component, including the leading dot.
///
/// `main.go` -> `.go`, `archive.tar.gz` -> `.gz`, `.env` -> `.env`,
/// `Makefile` -> `None`.
pub fn dotted_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}

/// Resolve `path` against `base` (when relative) and clean the result.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean_path(path)
    } else {
        clean_path(&base.join(path))
    }
}
