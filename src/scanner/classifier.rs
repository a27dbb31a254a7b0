/// Decides whether an import path names an externally hosted package.
pub trait PathClassifier {
    fn is_external(&self, import_path: &str) -> bool;
}

/// Text before the first `/` of an import path.
pub fn domain_segment(import_path: &str) -> &str {
    import_path.split('/').next().unwrap_or(import_path)
}

/// The default heuristic: a path is external when its first segment contains
/// a dot (`github.com/owner/repo`, `gopkg.in/yaml.v2`). Standard library paths
/// (`fmt`, `net/http`) have none.
///
/// Builtin paths that happen to contain a dot are misreported as external, and
/// hosted paths without one are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedDomain;

impl PathClassifier for DottedDomain {
    fn is_external(&self, import_path: &str) -> bool {
        domain_segment(import_path).contains('.')
    }
}

/// Only paths hosted on one of the listed hosts are external.
#[derive(Debug, Clone)]
pub struct RegistryAllowList {
    hosts: Vec<String>,
}

impl RegistryAllowList {
    pub fn new(hosts: Vec<String>) -> Self {
        Self { hosts }
    }
}

impl PathClassifier for RegistryAllowList {
    fn is_external(&self, import_path: &str) -> bool {
        let domain = domain_segment(import_path);
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(domain))
    }
}

/// Wraps another classifier and discards paths under the given prefixes, e.g.
/// the project's own module path.
pub struct IgnorePrefixes<C> {
    inner: C,
    prefixes: Vec<String>,
}

impl<C: PathClassifier> IgnorePrefixes<C> {
    pub fn new(inner: C, prefixes: Vec<String>) -> Self {
        Self { inner, prefixes }
    }

    fn is_ignored(&self, import_path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            import_path == prefix
                || import_path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl<C: PathClassifier> PathClassifier for IgnorePrefixes<C> {
    fn is_external(&self, import_path: &str) -> bool {
        !self.is_ignored(import_path) && self.inner.is_external(import_path)
    }
}

impl PathClassifier for Box<dyn PathClassifier> {
    fn is_external(&self, import_path: &str) -> bool {
        self.as_ref().is_external(import_path)
    }
}
