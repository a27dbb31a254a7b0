use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::diag::Diagnostics;
use crate::error::ScanError;

/// Decides which filesystem entries the walk visits and which files it keeps.
#[derive(Debug, Clone)]
pub struct PathFilter {
    suffix: String,
    vendor_dir: String,
}

impl PathFilter {
    pub fn new(suffix: impl Into<String>, vendor_dir: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            vendor_dir: vendor_dir.into(),
        }
    }

    /// `false` for anything inside the vendored directory, at any depth below
    /// the root. The vendored directory itself is excluded too, so its subtree
    /// is never entered.
    pub fn should_visit(&self, relative: &Path) -> bool {
        !relative
            .components()
            .any(|c| c.as_os_str() == self.vendor_dir.as_str())
    }

    /// `true` for file names that end with the source suffix.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(&self.suffix))
            .unwrap_or(false)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(".go", "vendor")
    }
}

/// Collect every source file under `root`, depth-first, entries of each
/// directory in lexicographic file-name order.
pub fn walk(root: &Path, filter: &PathFilter, diag: &Diagnostics) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::ProjectRoot {
            path: root.to_path_buf(),
            reason: "no such file or directory".to_string(),
        });
    }
    if !root.is_dir() {
        return Err(ScanError::ProjectRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    if let Err(e) = std::fs::read_dir(root) {
        return Err(ScanError::ProjectRoot {
            path: root.to_path_buf(),
            reason: e.to_string(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| filter.should_visit(relative_to(root, e)));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if !filter.is_source_file(entry.path()) {
            continue;
        }
        files.push(entry.into_path());
    }

    diag.debug(format!("Got {} files", files.len()));
    Ok(files)
}

fn relative_to<'a>(root: &Path, entry: &'a DirEntry) -> &'a Path {
    entry.path().strip_prefix(root).unwrap_or(entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "package x\n").unwrap();
    }

    fn rel_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_walk_collects_sources_in_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "b/b.go");
        touch(dir.path(), "a/z.go");
        touch(dir.path(), "a/a.go");
        touch(dir.path(), "README.md");
        touch(dir.path(), "a/notes.go.txt");

        let files = walk(dir.path(), &PathFilter::default(), &Diagnostics::default()).unwrap();
        assert_eq!(
            rel_names(dir.path(), &files),
            vec!["a/a.go", "a/z.go", "b/b.go", "main.go"]
        );
    }

    #[test]
    fn test_walk_skips_vendor_subtree() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "vendor/github.com/foo/bar/bar.go");
        touch(dir.path(), "pkg/vendor/inner.go");
        touch(dir.path(), "pkg/vendored.go");

        let files = walk(dir.path(), &PathFilter::default(), &Diagnostics::default()).unwrap();
        assert_eq!(
            rel_names(dir.path(), &files),
            vec!["main.go", "pkg/vendored.go"]
        );
    }

    #[test]
    fn test_walk_custom_suffix_and_vendor_dir() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "x.gox");
        touch(dir.path(), "y.go");
        touch(dir.path(), "third_party/z.gox");

        let filter = PathFilter::new(".gox", "third_party");
        let files = walk(dir.path(), &filter, &Diagnostics::default()).unwrap();
        assert_eq!(rel_names(dir.path(), &files), vec!["x.gox"]);
    }

    #[test]
    fn test_walk_missing_root_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = walk(&missing, &PathFilter::default(), &Diagnostics::default()).unwrap_err();
        assert!(matches!(err, ScanError::ProjectRoot { .. }));
    }

    #[test]
    fn test_walk_file_root_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        let err = walk(
            &dir.path().join("main.go"),
            &PathFilter::default(),
            &Diagnostics::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::ProjectRoot { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_configuration_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        touch(dir.path(), "locked/main.go");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user.
        let readable = fs::read_dir(&locked).is_ok();
        let result = walk(&locked, &PathFilter::default(), &Diagnostics::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert!(matches!(result, Err(ScanError::ProjectRoot { .. })));
    }

    #[test]
    fn test_directory_named_like_source_is_not_collected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("weird.go")).unwrap();
        touch(dir.path(), "weird.go/inside.go");

        let files = walk(dir.path(), &PathFilter::default(), &Diagnostics::default()).unwrap();
        assert_eq!(rel_names(dir.path(), &files), vec!["weird.go/inside.go"]);
    }
}
