//! The import scan: walk the tree, extract candidates from each file, keep
//! the external ones, deduplicate.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::diag::Diagnostics;
use crate::error::ScanError;

pub mod classifier;
pub mod extractor;
pub mod package_set;
pub mod walker;

use classifier::PathClassifier;
use extractor::ImportExtractor;
use package_set::{Origin, PackageSet};
use walker::PathFilter;

/// What to do when a source file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Fail the whole scan; no partial result.
    #[default]
    Abort,
    /// Skip the file, print a warning and record it in [`ScanOutcome::skipped`].
    Skip,
}

/// Progress notifications emitted while scanning.
#[derive(Debug, Clone, Copy)]
pub enum Progress {
    /// The walk finished and this many files will be read.
    Walked(usize),
    FileDone,
}

/// Result of one scan invocation.
#[derive(Debug)]
pub struct ScanOutcome {
    pub packages: PackageSet,
    pub files_scanned: usize,
    /// Files skipped under [`ReadErrorPolicy::Skip`], with the error text.
    pub skipped: Vec<(PathBuf, String)>,
}

pub struct Scanner<C> {
    filter: PathFilter,
    extractor: ImportExtractor,
    classifier: C,
    on_read_error: ReadErrorPolicy,
    diag: Diagnostics,
}

impl<C: PathClassifier> Scanner<C> {
    pub fn new(
        filter: PathFilter,
        classifier: C,
        on_read_error: ReadErrorPolicy,
        diag: Diagnostics,
    ) -> Result<Self> {
        Ok(Self {
            filter,
            extractor: ImportExtractor::new(diag)?,
            classifier,
            on_read_error,
            diag,
        })
    }

    /// Walk `root` and collect every external import path, in first-seen order.
    pub fn scan(
        &self,
        root: &Path,
        mut progress: impl FnMut(Progress),
    ) -> Result<ScanOutcome, ScanError> {
        let files = walker::walk(root, &self.filter, &self.diag)?;
        progress(Progress::Walked(files.len()));

        self.diag.debug("Parsing project files for unique packages...");

        let mut packages = PackageSet::new();
        let mut skipped = Vec::new();
        let mut files_scanned = 0;

        for file in &files {
            match self.scan_file(file) {
                Ok(found) => {
                    files_scanned += 1;
                    for path in found {
                        packages.add_from_file(&path, file);
                    }
                }
                Err(ScanError::FileRead { path, source })
                    if self.on_read_error == ReadErrorPolicy::Skip =>
                {
                    self.diag
                        .warn(format!("Skipping unreadable file '{}': {}", path.display(), source));
                    skipped.push((path, source.to_string()));
                }
                Err(e) => return Err(e),
            }
            progress(Progress::FileDone);
        }

        self.diag
            .debug(format!("Found {} unique packages", packages.len()));

        Ok(ScanOutcome {
            packages,
            files_scanned,
            skipped,
        })
    }

    /// External import paths of a single file, in line order, duplicates kept.
    pub fn scan_file(&self, file: &Path) -> Result<Vec<String>, ScanError> {
        self.diag
            .debug(format!("Reading file: '{}'...", file.display()));

        let bytes = std::fs::read(file).map_err(|source| ScanError::FileRead {
            path: file.to_path_buf(),
            source,
        })?;
        // Stray non-UTF-8 bytes (Latin-1 comments, fixtures) must not hide imports.
        let text = String::from_utf8_lossy(&bytes);
        self.diag
            .debug(format!("\tFile contains {} lines", text.split('\n').count()));

        Ok(self.scan_text(&text))
    }

    /// External import paths found in `text`.
    pub fn scan_text(&self, text: &str) -> Vec<String> {
        self.extractor
            .extract(text)
            .into_iter()
            .filter(|candidate| self.classifier.is_external(candidate))
            .inspect(|path| self.diag.debug(format!("\t\tFound import: {}", path)))
            .map(str::to_string)
            .collect()
    }
}

/// Append manually configured packages to a scan result. Already-known paths
/// keep their original position.
pub fn supplement(packages: &mut PackageSet, extra: &[String], diag: &Diagnostics) {
    for path in extra {
        let path = path.trim();
        if path.is_empty() {
            continue;
        }
        if packages.add(path, Origin::Manual) {
            diag.debug(format!("Added configured package: {}", path));
        }
    }
}
