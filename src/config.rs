use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::scanner::classifier::{DottedDomain, IgnorePrefixes, PathClassifier, RegistryAllowList};
use crate::scanner::walker::PathFilter;
use crate::scanner::ReadErrorPolicy;

/// Root configuration structure, deserialized from `.godepo/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub packages: PackagesConfig,
}

/// Which files are scanned and how read failures are handled.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Source file suffix. Defaults to `.go`.
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Directory name whose subtree is never scanned. Defaults to `vendor`.
    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: String,
    /// `abort` (default) or `skip`.
    #[serde(default)]
    pub on_read_error: ReadErrorPolicy,
}

fn default_suffix() -> String {
    ".go".to_string()
}

fn default_vendor_dir() -> String {
    "vendor".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            suffix: default_suffix(),
            vendor_dir: default_vendor_dir(),
            on_read_error: ReadErrorPolicy::Abort,
        }
    }
}

impl ScanConfig {
    pub fn path_filter(&self) -> PathFilter {
        PathFilter::new(self.suffix.clone(), self.vendor_dir.clone())
    }
}

/// How an import path is judged external.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub policy: ClassifierPolicy,
    /// Hosts accepted by the `allow-list` policy, e.g. `"github.com"`.
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Import path prefixes that are never reported.
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierPolicy {
    /// External iff the first path segment contains a dot.
    #[default]
    DottedDomain,
    /// External iff the first path segment is one of `hosts`.
    AllowList,
}

impl ClassifierConfig {
    /// Build the classifier, discarding `extra_ignore` prefixes in addition to
    /// the configured ones.
    pub fn build(&self, extra_ignore: Option<String>) -> Result<Box<dyn PathClassifier>> {
        let mut ignore = self.ignore.clone();
        ignore.extend(extra_ignore);

        let classifier: Box<dyn PathClassifier> = match self.policy {
            ClassifierPolicy::DottedDomain => Box::new(IgnorePrefixes::new(DottedDomain, ignore)),
            ClassifierPolicy::AllowList => {
                if self.hosts.is_empty() {
                    bail!("classifier policy 'allow-list' requires at least one entry in 'hosts'");
                }
                Box::new(IgnorePrefixes::new(
                    RegistryAllowList::new(self.hosts.clone()),
                    ignore,
                ))
            }
        };
        Ok(classifier)
    }
}

/// Packages added by hand, for imports the scan cannot see.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    #[serde(default)]
    pub extra: Vec<String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.godepo/config.toml`
/// 3. `~/.config/godepo/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".godepo").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("godepo").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config '{}': {}", path.display(), e))?;
    toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config '{}': {}", path.display(), e))
}

/// Replace a leading `~` in `path` with the current user's home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    expand_home_with(path, dirs::home_dir())
}

fn expand_home_with(path: &Path, home: Option<PathBuf>) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return Ok(path.to_path_buf()),
    };

    let Some(home) = home else {
        bail!(
            "project path '{}' uses '~', but the current user has no home directory",
            path.display()
        );
    };

    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}
