use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scanner::classifier::domain_segment;
use crate::scanner::package_set::Origin;
use crate::scanner::ScanOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub import_path: String,
    pub host: String,
    pub source: PackageSource,
    /// File the import was first found in, relative to the project root.
    pub first_seen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageSource {
    Scan,
    Config,
}

impl std::fmt::Display for PackageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageSource::Scan => write!(f, "scan"),
            PackageSource::Config => write!(f, "config"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub error: String,
}

/// Everything a report renderer needs about one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub root: String,
    pub files_scanned: usize,
    pub skipped: Vec<SkippedFile>,
    pub packages: Vec<Package>,
}

impl ScanReport {
    pub fn from_outcome(root: &Path, outcome: &ScanOutcome) -> Self {
        let packages = outcome
            .packages
            .iter()
            .map(|(path, origin)| {
                let (source, first_seen) = match origin {
                    Origin::File(file) => (PackageSource::Scan, Some(display_relative(root, file))),
                    Origin::Manual => (PackageSource::Config, None),
                };
                Package {
                    import_path: path.to_string(),
                    host: domain_segment(path).to_string(),
                    source,
                    first_seen,
                }
            })
            .collect();

        let skipped = outcome
            .skipped
            .iter()
            .map(|(path, error)| SkippedFile {
                path: display_relative(root, path),
                error: error.clone(),
            })
            .collect();

        ScanReport {
            root: root.display().to_string(),
            files_scanned: outcome.files_scanned,
            skipped,
            packages,
        }
    }
}

fn display_relative(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .display()
        .to_string()
}
