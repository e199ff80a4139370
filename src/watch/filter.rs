// src/watch/filter.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::watch::path_utils::{clean_path, dotted_extension};

/// Which files the scanner registers.
///
/// Built once at startup and shared read-only for the life of the process.
/// Extensions keep their configured order (duplicates dropped) and are
/// matched exactly, including the leading dot and case. Exclude entries are
/// cleaned when the filter is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    extensions: Vec<String>,
    excludes: BTreeSet<PathBuf>,
}

/// Outcome of running a walked path through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Excluded,
    WrongExtension,
    Watch,
}

impl FilterConfig {
    pub fn new<E, X>(extensions: E, excludes: X) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        X: IntoIterator,
        X::Item: AsRef<Path>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.into();
            if !ordered.contains(&ext) {
                ordered.push(ext);
            }
        }

        Self {
            extensions: ordered,
            excludes: excludes
                .into_iter()
                .map(|p| clean_path(p.as_ref()))
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn excludes(&self) -> impl Iterator<Item = &Path> {
        self.excludes.iter().map(PathBuf::as_path)
    }

    /// True if the cleaned form of `path` is one of the exclude entries.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.contains(&clean_path(path))
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        match dotted_extension(path) {
            Some(ext) => self.extensions.iter().any(|t| t == ext),
            None => false,
        }
    }

    /// Exclusion is checked before the extension.
    pub fn decide(&self, path: &Path) -> FilterDecision {
        if self.is_excluded(path) {
            FilterDecision::Excluded
        } else if !self.matches_extension(path) {
            FilterDecision::WrongExtension
        } else {
            FilterDecision::Watch
        }
    }
}
