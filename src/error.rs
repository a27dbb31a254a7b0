use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a scan.
///
/// Heuristic misses (an import the lexical scan does not recognise) are not
/// errors; they are simply absent from the result.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The project root is missing, not a directory, or unreadable. Raised before any
    /// file is read.
    #[error("project path '{}' is not usable: {reason}", .path.display())]
    ProjectRoot { path: PathBuf, reason: String },

    /// Directory enumeration failed part-way through the walk.
    #[error("failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A source file could not be read.
    #[error("failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
